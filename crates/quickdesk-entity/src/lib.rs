//! # quickdesk-entity
//!
//! Domain entity models for QuickDesk. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! Entities serialize with camelCase keys, which is the shape the HTTP API
//! and the client crate exchange.

pub mod category;
pub mod question;
pub mod ticket;
pub mod upgrade;
pub mod user;
pub mod view;
