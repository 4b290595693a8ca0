//! Upgrade request status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolution state of a role upgrade request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "upgrade_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UpgradeStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Granted; the requester was promoted.
    Approved,
    /// Declined.
    Rejected,
}

impl UpgradeStatus {
    /// A request is resolved exactly once.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for UpgradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
