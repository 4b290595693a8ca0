//! Store-wide introspection and maintenance.

use async_trait::async_trait;

use quickdesk_core::result::AppResult;

use crate::collection::{Collection, CollectionStats, DatabaseHealth};

/// Operations spanning whole collections.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync + std::fmt::Debug {
    /// Statistics for every collection in [`Collection::ALL`] order.
    async fn collection_stats(&self) -> AppResult<Vec<CollectionStats>>;

    /// Delete every document in `collection`, returning the count removed.
    /// Owned sub-documents of the removed rows go with them.
    async fn clear(&self, collection: Collection) -> AppResult<u64>;

    /// Connectivity report.
    async fn health(&self) -> AppResult<DatabaseHealth>;
}
