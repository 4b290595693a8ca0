//! Role upgrade request model.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{UpgradeRequestId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::UpgradeStatus;

/// A user's request to be promoted to agent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpgradeRequest {
    /// Unique request identifier.
    pub id: UpgradeRequestId,
    /// The requesting user.
    pub requester: UserId,
    /// Resolution state.
    pub status: UpgradeStatus,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
    /// When an admin resolved it.
    pub resolved_at: Option<DateTime<Utc>>,
    /// The admin who resolved it.
    pub resolved_by: Option<UserId>,
}

impl RoleUpgradeRequest {
    /// Whether the request still awaits a decision.
    pub fn is_pending(&self) -> bool {
        self.status == UpgradeStatus::Pending
    }
}
