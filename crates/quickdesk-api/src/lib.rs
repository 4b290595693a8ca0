//! # quickdesk-api
//!
//! HTTP API layer for QuickDesk built on Axum.
//!
//! Routes are grouped by domain in [`router`]; every handler receives the
//! shared [`AppState`] and an [`extractors::AuthUser`] where a signed-in
//! caller is required. Domain errors become `{error, message}` bodies via
//! [`error::ApiError`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
