//! Accounts: registration, login, profile and role upgrade requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use quickdesk_auth::{JwtEncoder, PasswordHasher, PasswordValidator, RbacEnforcer, SystemPermission};
use quickdesk_core::error::AppError;
use quickdesk_core::types::{CategoryId, UpgradeRequestId};
use quickdesk_database::Store;
use quickdesk_entity::upgrade::UpgradeStatus;
use quickdesk_entity::user::{CreateUser, DEFAULT_LANGUAGE, UpdateUser, User, UserRole};
use quickdesk_entity::view::UpgradeRequestView;

use crate::context::RequestContext;
use crate::join;

/// Self-service sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub language: Option<String>,
    pub categories_of_interest: Option<Vec<CategoryId>>,
}

/// A signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: User,
}

/// Handles everything under `/auth`.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Repository bundle.
    store: Store,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        store: Store,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            store,
            hasher,
            validator,
            encoder,
            rbac,
        }
    }

    fn session(&self, user: User) -> Result<AuthSession, AppError> {
        let issued = self.encoder.issue(&user)?;
        Ok(AuthSession {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// Creates a `user` account and signs it in.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthSession, AppError> {
        let name = req.name.trim();
        let email = req.email.trim().to_lowercase();
        if name.is_empty() || email.is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Missing required fields"));
        }
        self.validator.validate(&req.password)?;

        if self.store.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .store
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email,
                password_hash,
                role: UserRole::User,
                language: DEFAULT_LANGUAGE.to_string(),
                categories_of_interest: Vec::new(),
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        self.session(user)
    }

    /// Verifies credentials and issues a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.store.users.find_by_email(&email).await? else {
            warn!(email = %email, "Login failed: unknown email");
            return Err(AppError::unauthorized("Invalid credentials"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        info!(user_id = %user.id, "User logged in");
        self.session(user)
    }

    /// The caller's own account.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.store
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the caller's own name, language and interests.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        profile: ProfileUpdate,
    ) -> Result<User, AppError> {
        if profile.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Name must not be empty"));
        }

        let update = UpdateUser {
            name: profile.name.map(|n| n.trim().to_string()),
            language: profile.language,
            categories_of_interest: profile.categories_of_interest,
            ..Default::default()
        };
        self.store
            .users
            .update(ctx.user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Files a request to be promoted to agent.
    pub async fn request_upgrade(&self, ctx: &RequestContext) -> Result<UpgradeRequestView, AppError> {
        if !self
            .rbac
            .has_permission(&ctx.role, &SystemPermission::UpgradeRequest)
        {
            return Err(AppError::forbidden(
                "Only regular users can request an upgrade",
            ));
        }

        let request = self.store.upgrades.create(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, request_id = %request.id, "Upgrade requested");

        let mut views = join::upgrade_views(&self.store, vec![request]).await?;
        views
            .pop()
            .ok_or_else(|| AppError::internal("Upgrade join produced no view"))
    }

    /// Every upgrade request, pending first.
    pub async fn list_upgrade_requests(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<UpgradeRequestView>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UpgradeResolve)?;

        let requests = self.store.upgrades.find_all().await?;
        join::upgrade_views(&self.store, requests).await
    }

    /// Approves or rejects a pending request. Approval promotes a regular
    /// user to agent; higher roles are left alone.
    pub async fn resolve_upgrade(
        &self,
        ctx: &RequestContext,
        request_id: UpgradeRequestId,
        approved: bool,
    ) -> Result<UpgradeRequestView, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UpgradeResolve)?;

        let request = self
            .store
            .upgrades
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Upgrade request not found"))?;
        if !request.is_pending() {
            return Err(AppError::conflict("Upgrade request already resolved"));
        }

        let status = if approved {
            UpgradeStatus::Approved
        } else {
            UpgradeStatus::Rejected
        };
        let resolved = self
            .store
            .upgrades
            .resolve(request_id, status, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::conflict("Upgrade request already resolved"))?;

        if approved {
            let requester = self.store.users.find_by_id(resolved.requester).await?;
            match requester {
                Some(user) if user.role == UserRole::User => {
                    let promote = UpdateUser {
                        role: Some(UserRole::Agent),
                        ..Default::default()
                    };
                    self.store.users.update(user.id, &promote).await?;
                }
                Some(_) => {}
                None => warn!(request_id = %request_id, "Approved request for a deleted user"),
            }
        }

        info!(
            admin_id = %ctx.user_id,
            request_id = %request_id,
            status = %status,
            "Upgrade request resolved"
        );

        let mut views = join::upgrade_views(&self.store, vec![resolved]).await?;
        views
            .pop()
            .ok_or_else(|| AppError::internal("Upgrade join produced no view"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use quickdesk_auth::JwtDecoder;
    use quickdesk_core::error::ErrorKind;

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ann".into(),
            email: email.into(),
            password: "correct horse".into(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let fx = Fixture::new();
        let svc = fx.account_service();

        let session = svc.register(register_req("Ann@Example.com")).await.unwrap();
        assert_eq!(session.user.role, UserRole::User);
        assert_eq!(session.user.email, "ann@example.com");
        assert_eq!(session.user.language, DEFAULT_LANGUAGE);
        let claims = JwtDecoder::new(&fx.auth).decode(&session.token).unwrap();
        assert_eq!(claims.user_id(), session.user.id);

        let err = svc.register(register_req("ann@example.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let again = svc.login("ANN@example.com", "correct horse").await.unwrap();
        assert_eq!(again.user.id, session.user.id);

        let err = svc.login("ann@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        let err = svc.login("nobody@example.com", "correct horse").await.unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_update_profile() {
        let fx = Fixture::new();
        let user = fx.user("Ann", UserRole::User).await;
        let category = fx.category("Billing").await;

        let updated = fx
            .account_service()
            .update_profile(
                &Fixture::ctx(&user),
                ProfileUpdate {
                    language: Some("fr".into()),
                    categories_of_interest: Some(vec![category.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.language, "fr");
        assert_eq!(updated.categories_of_interest, vec![category.id]);
        assert_eq!(updated.name, "Ann");
    }

    #[tokio::test]
    async fn test_upgrade_flow() {
        let fx = Fixture::new();
        let user = fx.user("Ann", UserRole::User).await;
        let admin = fx.user("Root", UserRole::Admin).await;
        let svc = fx.account_service();
        let ctx = Fixture::ctx(&user);

        let request = svc.request_upgrade(&ctx).await.unwrap();
        assert_eq!(request.status, UpgradeStatus::Pending);
        let err = svc.request_upgrade(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = svc.list_upgrade_requests(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let admin_ctx = Fixture::ctx(&admin);
        let resolved = svc
            .resolve_upgrade(&admin_ctx, request.id, true)
            .await
            .unwrap();
        assert_eq!(resolved.status, UpgradeStatus::Approved);
        assert_eq!(resolved.resolved_by.unwrap().id, admin.id);

        let promoted = fx.store.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(promoted.role, UserRole::Agent);

        let err = svc
            .resolve_upgrade(&admin_ctx, request.id, false)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_staff_cannot_request_upgrade() {
        let fx = Fixture::new();
        let agent = fx.user("Agent", UserRole::Agent).await;
        let err = fx
            .account_service()
            .request_upgrade(&Fixture::ctx(&agent))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_rejection_keeps_role() {
        let fx = Fixture::new();
        let user = fx.user("Ann", UserRole::User).await;
        let admin = fx.user("Root", UserRole::Admin).await;
        let svc = fx.account_service();

        let request = svc.request_upgrade(&Fixture::ctx(&user)).await.unwrap();
        svc.resolve_upgrade(&Fixture::ctx(&admin), request.id, false)
            .await
            .unwrap();
        let stored = fx.store.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::User);
        assert_eq!(fx.store.upgrades.count_pending().await.unwrap(), 0);
    }
}
