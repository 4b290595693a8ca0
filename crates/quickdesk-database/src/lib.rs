//! # quickdesk-database
//!
//! Storage layer for QuickDesk. Repository traits in [`repositories`] are
//! implemented twice: by sqlx-backed PostgreSQL repositories and by an
//! in-memory store. [`Store`] bundles one implementation of every trait and
//! is selected from configuration at startup.

pub mod collection;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use collection::{Collection, CollectionStats, DatabaseHealth};
pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::Store;
