use async_trait::async_trait;
use chrono::Utc;

use quickdesk_core::error::AppError;
use quickdesk_core::result::AppResult;
use quickdesk_core::types::{UpgradeRequestId, UserId};
use quickdesk_entity::upgrade::{RoleUpgradeRequest, UpgradeStatus};

use super::store::{values, MemoryStore};
use crate::repositories::UpgradeRequestRepository;

#[async_trait]
impl UpgradeRequestRepository for MemoryStore {
    async fn create(&self, requester: UserId) -> AppResult<RoleUpgradeRequest> {
        let _guard = self.tables.write_lock.lock();
        let already_pending = self
            .tables
            .upgrades
            .iter()
            .any(|r| r.requester == requester && r.is_pending());
        if already_pending {
            return Err(AppError::conflict("An upgrade request is already pending"));
        }

        let request = RoleUpgradeRequest {
            id: UpgradeRequestId::new(),
            requester,
            status: UpgradeStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
            resolved_by: None,
        };
        self.tables.upgrades.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: UpgradeRequestId) -> AppResult<Option<RoleUpgradeRequest>> {
        Ok(self.tables.upgrades.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<RoleUpgradeRequest>> {
        let mut requests = values(&self.tables.upgrades);
        requests.sort_by(|a, b| {
            b.is_pending()
                .cmp(&a.is_pending())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(requests)
    }

    async fn resolve(
        &self,
        id: UpgradeRequestId,
        status: UpgradeStatus,
        resolved_by: UserId,
    ) -> AppResult<Option<RoleUpgradeRequest>> {
        Ok(match self.tables.upgrades.get_mut(&id) {
            Some(mut request) if request.is_pending() => {
                request.status = status;
                request.resolved_at = Some(Utc::now());
                request.resolved_by = Some(resolved_by);
                Some(request.clone())
            }
            _ => None,
        })
    }

    async fn count_pending(&self) -> AppResult<u64> {
        Ok(self.tables.upgrades.iter().filter(|r| r.is_pending()).count() as u64)
    }
}
