//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;
pub mod query;

pub use auth::AuthUser;
pub use json::ValidJson;
pub use path::parse_id;
pub use query::{DashboardTicketParams, QuestionListParams};
