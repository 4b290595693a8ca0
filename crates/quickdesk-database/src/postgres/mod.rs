//! PostgreSQL repository implementations backed by sqlx.

pub mod category;
pub mod comment;
pub mod maintenance;
pub mod question;
pub mod ticket;
pub mod upgrade;
pub mod user;

pub use category::PgCategoryRepository;
pub use comment::PgCommentRepository;
pub use maintenance::PgMaintenanceRepository;
pub use question::PgQuestionRepository;
pub use ticket::PgTicketRepository;
pub use upgrade::PgUpgradeRequestRepository;
pub use user::PgUserRepository;

use quickdesk_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error as a database error with context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Like [`db_error`], but unique-constraint violations become Conflict.
pub(crate) fn unique_error(
    context: &'static str,
    conflict_message: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return AppError::conflict(conflict_message);
            }
        }
        AppError::with_source(ErrorKind::Database, context, e)
    }
}

/// Convert a SQL `COUNT(*)` into an unsigned count.
pub(crate) fn to_count(n: i64) -> u64 {
    n.max(0) as u64
}
