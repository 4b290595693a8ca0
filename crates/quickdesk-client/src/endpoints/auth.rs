use reqwest::Method;
use serde_json::json;

use quickdesk_core::types::UpgradeRequestId;
use quickdesk_entity::user::User;
use quickdesk_entity::view::UpgradeRequestView;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{ProfileUpdate, Session, UpgradeResponse, UserEnvelope};

impl ApiClient {
    /// Signs in and keeps the returned token for later calls.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let session: Session = self
            .send(
                Method::POST,
                "/auth/login",
                &json!({ "email": email, "password": password }),
            )
            .await?;
        self.token_store().set_token(Some(session.token.clone()));
        Ok(session)
    }

    /// Creates an account and signs in as it.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session, ApiError> {
        let session: Session = self
            .send(
                Method::POST,
                "/auth/register",
                &json!({ "name": name, "email": email, "password": password }),
            )
            .await?;
        self.token_store().set_token(Some(session.token.clone()));
        Ok(session)
    }

    /// Drops the stored token. Nothing is sent to the server.
    pub fn logout(&self) {
        self.token_store().set_token(None);
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.get("/auth/me", &[]).await?;
        Ok(envelope.user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.send(Method::PUT, "/auth/profile", update).await?;
        Ok(envelope.user)
    }

    pub async fn request_upgrade(&self) -> Result<UpgradeResponse, ApiError> {
        self.call(Method::POST, "/auth/request-upgrade").await
    }

    pub async fn upgrade_requests(&self) -> Result<Vec<UpgradeRequestView>, ApiError> {
        self.get("/auth/upgrade-requests", &[]).await
    }

    pub async fn resolve_upgrade(
        &self,
        id: UpgradeRequestId,
        approved: bool,
    ) -> Result<UpgradeResponse, ApiError> {
        self.send(
            Method::PUT,
            &format!("/auth/approve-upgrade/{id}"),
            &json!({ "approved": approved }),
        )
        .await
    }
}
