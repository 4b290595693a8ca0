//! Role upgrade request repository contract.

use async_trait::async_trait;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{UpgradeRequestId, UserId};
use quickdesk_entity::upgrade::{RoleUpgradeRequest, UpgradeStatus};

/// Persistence operations on role upgrade requests.
#[async_trait]
pub trait UpgradeRequestRepository: Send + Sync + std::fmt::Debug {
    /// File a pending request. Conflict when `requester` already has one.
    async fn create(&self, requester: UserId) -> AppResult<RoleUpgradeRequest>;

    /// Find a request by primary key.
    async fn find_by_id(&self, id: UpgradeRequestId) -> AppResult<Option<RoleUpgradeRequest>>;

    /// All requests, pending first, then newest first.
    async fn find_all(&self) -> AppResult<Vec<RoleUpgradeRequest>>;

    /// Resolve a pending request. `None` when the request does not exist
    /// or was already resolved.
    async fn resolve(
        &self,
        id: UpgradeRequestId,
        status: UpgradeStatus,
        resolved_by: UserId,
    ) -> AppResult<Option<RoleUpgradeRequest>>;

    /// Number of pending requests.
    async fn count_pending(&self) -> AppResult<u64>;
}
