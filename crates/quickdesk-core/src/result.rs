//! Convenience result type alias for QuickDesk.

use crate::error::AppError;

/// A specialized `Result` type for QuickDesk operations.
pub type AppResult<T> = Result<T, AppError>;
