//! User entity model.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{CategoryId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// Default interface language for new accounts.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A registered QuickDesk account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// Preferred interface language.
    pub language: String,
    /// Categories the user wants to follow.
    #[serde(rename = "categoryInInterest")]
    pub categories_of_interest: Vec<CategoryId>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this user may work tickets (agent or admin).
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Build the public summary used when embedding this user elsewhere.
    pub fn summary(&self) -> UserSummary {
        UserSummary::from(self)
    }
}

/// The subset of a user attached to tickets and questions on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role at read time.
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address (stored lowercased).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Preferred language.
    pub language: String,
    /// Categories of interest.
    pub categories_of_interest: Vec<CategoryId>,
}

/// Partial update of a user. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New language.
    pub language: Option<String>,
    /// New categories of interest.
    pub categories_of_interest: Option<Vec<CategoryId>>,
}

impl UpdateUser {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.language.is_none()
            && self.categories_of_interest.is_none()
    }

    /// Apply the update onto an in-memory user.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(language) = &self.language {
            user.language = language.clone();
        }
        if let Some(categories) = &self.categories_of_interest {
            user.categories_of_interest = categories.clone();
        }
    }
}
