//! In-memory store implementing every repository trait.
//!
//! Used by tests and by `provider = "memory"` deployments. Tables are
//! `DashMap`s; conditional updates (claim, vote, email uniqueness) run
//! under the entry's shard lock so they are atomic per key.

mod category;
mod maintenance;
mod question;
mod store;
mod ticket;
mod upgrade;
mod user;

pub use store::MemoryStore;

#[cfg(test)]
mod tests;
