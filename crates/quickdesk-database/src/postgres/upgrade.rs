//! Role upgrade request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{UpgradeRequestId, UserId};
use quickdesk_entity::upgrade::{RoleUpgradeRequest, UpgradeStatus};

use super::{db_error, to_count, unique_error};
use crate::repositories::UpgradeRequestRepository;

/// PostgreSQL-backed upgrade request repository.
///
/// The one-pending-per-user rule is a partial unique index.
#[derive(Debug, Clone)]
pub struct PgUpgradeRequestRepository {
    pool: PgPool,
}

impl PgUpgradeRequestRepository {
    /// Create a new upgrade request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UpgradeRequestRepository for PgUpgradeRequestRepository {
    async fn create(&self, requester: UserId) -> AppResult<RoleUpgradeRequest> {
        sqlx::query_as::<_, RoleUpgradeRequest>(
            r#"
            INSERT INTO role_upgrade_requests (id, requester, status, created_at)
            VALUES ($1, $2, 'pending', NOW())
            RETURNING *
            "#,
        )
        .bind(UpgradeRequestId::new())
        .bind(requester)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_error(
            "Failed to create upgrade request",
            "An upgrade request is already pending",
        ))
    }

    async fn find_by_id(&self, id: UpgradeRequestId) -> AppResult<Option<RoleUpgradeRequest>> {
        sqlx::query_as::<_, RoleUpgradeRequest>("SELECT * FROM role_upgrade_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find upgrade request"))
    }

    async fn find_all(&self) -> AppResult<Vec<RoleUpgradeRequest>> {
        sqlx::query_as::<_, RoleUpgradeRequest>(
            "SELECT * FROM role_upgrade_requests ORDER BY (status = 'pending') DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list upgrade requests"))
    }

    async fn resolve(
        &self,
        id: UpgradeRequestId,
        status: UpgradeStatus,
        resolved_by: UserId,
    ) -> AppResult<Option<RoleUpgradeRequest>> {
        sqlx::query_as::<_, RoleUpgradeRequest>(
            r#"
            UPDATE role_upgrade_requests
            SET status = $2, resolved_at = NOW(), resolved_by = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(resolved_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to resolve upgrade request"))
    }

    async fn count_pending(&self) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM role_upgrade_requests WHERE status = 'pending'",
        )
        .fetch_one(&self.pool)
        .await
        .map(to_count)
        .map_err(db_error("Failed to count upgrade requests"))
    }
}
