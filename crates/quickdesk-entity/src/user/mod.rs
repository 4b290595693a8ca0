//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, DEFAULT_LANGUAGE, UpdateUser, User, UserSummary};
pub use role::UserRole;
