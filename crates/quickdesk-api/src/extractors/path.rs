//! Path parameter parsing helpers.

use std::str::FromStr;

use quickdesk_core::error::AppError;

/// Parses a typed identifier from a path segment.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid ID: {s}")))
}
