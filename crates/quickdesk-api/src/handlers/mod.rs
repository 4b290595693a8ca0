//! HTTP handlers, one module per route group.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod questions;
pub mod tickets;
