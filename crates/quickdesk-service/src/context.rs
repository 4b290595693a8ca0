//! Request context carrying the authenticated actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quickdesk_core::types::UserId;
use quickdesk_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API layer from the stored user, so `role` reflects the
/// role at request time rather than at token issue time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's current role.
    pub role: UserRole,
    /// The user's email.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole, email: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            email: email.into(),
            request_time: Utc::now(),
        }
    }

    /// Creates a context acting as `user`.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id, user.role, user.email.clone())
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user is an agent or admin.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
