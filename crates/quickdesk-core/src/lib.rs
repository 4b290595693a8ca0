//! # quickdesk-core
//!
//! Core crate for QuickDesk. Contains configuration schemas, typed
//! identifiers, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other QuickDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
