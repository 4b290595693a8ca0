//! Shared helpers for router-level integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use quickdesk_api::{AppState, build_app};
use quickdesk_auth::{JwtEncoder, PasswordHasher};
use quickdesk_core::config::{AppConfig, StoreProvider};
use quickdesk_database::{MemoryStore, Store};
use quickdesk_entity::user::{CreateUser, User, UserRole};

pub const PASSWORD: &str = "password123";

/// Response status plus parsed JSON body (`Value::Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// The full application over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// A seeded account and a bearer token for it.
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> String {
        self.user.id.to_string()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-secret".to_string();

        let state = AppState::new(config, Store::memory(MemoryStore::new()));
        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// Inserts an account directly into the store.
    pub async fn create_user(&self, name: &str, role: UserRole) -> TestUser {
        let hash = PasswordHasher::new().hash_password(PASSWORD).unwrap();
        let user = self
            .state
            .store
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: hash,
                role,
                language: "en".to_string(),
                categories_of_interest: vec![],
            })
            .await
            .unwrap();
        let token = JwtEncoder::new(&self.state.config.auth)
            .issue(&user)
            .unwrap()
            .token;
        TestUser { user, token }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request("GET", uri, None, Some(token)).await
    }

    pub async fn send(&self, method: &str, uri: &str, body: Value, token: &str) -> TestResponse {
        self.request(method, uri, Some(body), Some(token)).await
    }
}
