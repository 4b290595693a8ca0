//! Admin user management: CRUD, role changes, password resets and bulk
//! operations.

use serde::{Deserialize, Serialize};
use tracing::info;

use quickdesk_auth::SystemPermission;
use quickdesk_core::error::AppError;
use quickdesk_core::types::{CategoryId, UserId};
use quickdesk_entity::user::{CreateUser, DEFAULT_LANGUAGE, UpdateUser, User, UserRole};

use super::AdminService;
use crate::context::RequestContext;

/// Request to create a user on someone's behalf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role, `user` when absent.
    pub role: Option<UserRole>,
    /// Language, `en` when absent.
    pub language: Option<String>,
    /// Categories of interest.
    pub categories_of_interest: Option<Vec<CategoryId>>,
}

impl AdminService {
    /// Lists every user. Password hashes never leave the entity.
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        self.store.users.find_all().await
    }

    /// Creates a user with a hashed password.
    pub async fn create_user(&self, ctx: &RequestContext, req: NewUser) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        let name = req.name.trim();
        let email = req.email.trim().to_lowercase();
        if name.is_empty() || email.is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Missing required fields"));
        }

        if self.store.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        self.validator.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .store
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email,
                password_hash,
                role: req.role.unwrap_or_default(),
                language: req.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
                categories_of_interest: req.categories_of_interest.unwrap_or_default(),
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            role = %user.role,
            "Admin created user"
        );

        Ok(user)
    }

    /// Partially updates a user's profile fields.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        mut update: UpdateUser,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name must not be empty"));
            }
        }
        if let Some(email) = update.email.take() {
            let email = email.trim().to_lowercase();
            if email.is_empty() {
                return Err(AppError::validation("Email must not be empty"));
            }
            update.email = Some(email);
        }

        let user = self
            .store
            .users
            .update(user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(admin_id = %ctx.user_id, user_id = %user_id, "Admin updated user");
        Ok(user)
    }

    /// Changes a single user's role.
    pub async fn change_user_role(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        role: UserRole,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        let update = UpdateUser {
            role: Some(role),
            ..Default::default()
        };
        let user = self
            .store
            .users
            .update(user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user_id,
            new_role = %role,
            "Admin changed user role"
        );
        Ok(user)
    }

    /// Replaces a user's password.
    pub async fn reset_user_password(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        new_password: Option<&str>,
    ) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        let new_password = match new_password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(AppError::validation("New password required")),
        };
        self.validator.validate(new_password)?;
        let hash = self.hasher.hash_password(new_password)?;

        if !self.store.users.update_password(user_id, &hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(admin_id = %ctx.user_id, user_id = %user_id, "Admin reset user password");
        Ok(())
    }

    /// Hard-deletes a user. Tickets and questions keep their dangling
    /// references.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: UserId) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        if !self.store.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(admin_id = %ctx.user_id, user_id = %user_id, "Admin deleted user");
        Ok(())
    }

    /// Deletes every listed user in one statement and returns how many
    /// existed.
    pub async fn bulk_delete_users(
        &self,
        ctx: &RequestContext,
        user_ids: &[UserId],
    ) -> Result<u64, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        if user_ids.is_empty() {
            return Err(AppError::validation("Invalid user IDs array"));
        }

        let deleted = self.store.users.delete_many(user_ids).await?;
        info!(
            admin_id = %ctx.user_id,
            requested = user_ids.len(),
            deleted,
            "Admin bulk-deleted users"
        );
        Ok(deleted)
    }

    /// Sets the role of every listed user in one statement and returns
    /// how many actually changed.
    pub async fn bulk_change_user_roles(
        &self,
        ctx: &RequestContext,
        user_ids: &[UserId],
        role: Option<UserRole>,
    ) -> Result<u64, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserManage)?;

        let role = match role {
            Some(role) if !user_ids.is_empty() => role,
            _ => return Err(AppError::validation("Invalid parameters")),
        };

        let modified = self.store.users.set_role_many(user_ids, role).await?;
        info!(
            admin_id = %ctx.user_id,
            requested = user_ids.len(),
            modified,
            new_role = %role,
            "Admin bulk-changed user roles"
        );
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use quickdesk_core::error::ErrorKind;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Linus".into(),
            email: email.into(),
            password: "hunter2hunter2".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_user_requires_fields() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let svc = fx.admin_service();

        let err = svc
            .create_user(&Fixture::ctx(&admin), NewUser::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Missing required fields");
    }

    #[tokio::test]
    async fn test_create_user_conflicts_on_existing_email() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let created = svc.create_user(&ctx, new_user("linus@example.com")).await.unwrap();
        assert_eq!(created.role, UserRole::User);
        assert_eq!(created.language, "en");
        assert_ne!(created.password_hash, "hunter2hunter2");

        let err = svc
            .create_user(&ctx, new_user("LINUS@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(fx.store.users.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let fx = Fixture::new();
        let agent = fx.user("Agent", UserRole::Agent).await;
        let err = fx
            .admin_service()
            .list_users(&Fixture::ctx(&agent))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found_and_store_unchanged() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);
        let ghost = UserId::new();

        let err = svc.delete_user(&ctx, ghost).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = svc
            .change_user_role(&ctx, ghost, UserRole::Agent)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(fx.store.users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reset_password_requires_value() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let user = fx.user("Ann", UserRole::User).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let err = svc.reset_user_password(&ctx, user.id, None).await.unwrap_err();
        assert_eq!(err.message, "New password required");
        let err = svc.reset_user_password(&ctx, user.id, Some("")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        svc.reset_user_password(&ctx, user.id, Some("brand-new-pass"))
            .await
            .unwrap();
        let stored = fx.store.users.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_bulk_delete() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let a = fx.user("A", UserRole::User).await;
        let b = fx.user("B", UserRole::User).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let err = svc.bulk_delete_users(&ctx, &[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let deleted = svc
            .bulk_delete_users(&ctx, &[a.id, b.id, UserId::new()])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(fx.store.users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bulk_role_change() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let a = fx.user("A", UserRole::User).await;
        let b = fx.user("B", UserRole::Agent).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let err = svc
            .bulk_change_user_roles(&ctx, &[a.id], None)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid parameters");

        let modified = svc
            .bulk_change_user_roles(&ctx, &[a.id, b.id], Some(UserRole::Agent))
            .await
            .unwrap();
        assert_eq!(modified, 1);
        assert_eq!(fx.store.users.count_by_role(UserRole::Agent).await.unwrap(), 2);
    }
}
