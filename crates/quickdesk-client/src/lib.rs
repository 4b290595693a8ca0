//! # quickdesk-client
//!
//! Typed client for the QuickDesk HTTP API plus the state of the agent
//! panel and user management views.
//!
//! ## Modules
//!
//! - `client`: [`ApiClient`], bearer injection and response decoding
//! - `endpoints`: one `impl ApiClient` block per route group
//! - `views`: view state as plain data, pure reducers and filters

pub mod client;
pub mod endpoints;
pub mod error;
pub mod token;
pub mod types;
pub mod views;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, FALLBACK_MESSAGE};
pub use token::{MemoryTokenStore, TokenStore};
