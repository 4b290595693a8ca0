//! HTTP plumbing shared by every endpoint group.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::token::{MemoryTokenStore, TokenStore};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Client for the QuickDesk API.
///
/// Every request carries `Authorization: Bearer <token>` when the token
/// store holds one. Non-2xx responses become [`ApiError`] with the
/// server's `message`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    /// Creates a client with in-memory token storage.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_token_store(base_url, Arc::new(MemoryTokenStore::new()))
    }

    /// Creates a client over a caller-provided token store.
    pub fn with_token_store(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Whether a bearer token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.token().is_some()
    }

    pub(crate) fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&format!("{}{}", self.base_url, path)).map_err(ApiError::transport)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn builder(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");

        if !status.is_success() {
            let body = response.json::<serde_json::Value>().await.ok();
            return Err(ApiError::from_body(status.as_u16(), body.as_ref()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::new(status.as_u16(), format!("Invalid response body: {e}")))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        self.execute(self.builder(Method::GET, url)).await
    }

    pub(crate) async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        self.execute(self.builder(method, url).json(body)).await
    }

    /// A request without a body.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        self.execute(self.builder(method, url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://localhost:5000/");
        let url = client
            .url(
                "/questions",
                &[("search", "vpn token".to_string()), ("page", "2".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/questions?search=vpn+token&page=2"
        );
    }

    #[test]
    fn test_token_presence() {
        let client = ApiClient::default();
        assert!(!client.is_authenticated());
        client.token_store().set_token(Some("abc".into()));
        assert!(client.is_authenticated());
    }
}
