//! Typed wrappers for every API route, grouped by area.

mod admin;
mod auth;
mod dashboard;
mod questions;
mod tickets;
