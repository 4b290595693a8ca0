//! User repository contract.

use async_trait::async_trait;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::UserId;
use quickdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

/// Persistence operations on user accounts.
///
/// Emails are compared case-insensitively; `create` and `update` fail with
/// a Conflict error when the email belongs to another account.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Fetch every user whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// All users, newest first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Users holding any of `roles`, ordered by name.
    async fn find_by_roles(&self, roles: &[UserRole]) -> AppResult<Vec<User>>;

    /// The `limit` most recently created users.
    async fn find_recent(&self, limit: u64) -> AppResult<Vec<User>>;

    /// Insert a new user.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update. `None` when the id does not exist.
    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<Option<User>>;

    /// Replace the password hash. `false` when the id does not exist.
    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<bool>;

    /// Hard-delete a user. `false` when the id does not exist.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// Delete every listed user in one mutation, returning the number removed.
    async fn delete_many(&self, ids: &[UserId]) -> AppResult<u64>;

    /// Set `role` on every listed user in one mutation, returning the
    /// number of rows whose role actually changed.
    async fn set_role_many(&self, ids: &[UserId], role: UserRole) -> AppResult<u64>;

    /// Total number of users.
    async fn count(&self) -> AppResult<u64>;

    /// Number of users holding `role`.
    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;
}
