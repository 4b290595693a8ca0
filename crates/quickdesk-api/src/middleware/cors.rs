//! Cross-origin policy.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use quickdesk_core::config::CorsConfig;

fn origins(config: &CorsConfig) -> AllowOrigin {
    if config.allows_any_origin() {
        return Any.into();
    }
    let parsed: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}

/// Browser clients send the bearer token in `Authorization` and JSON
/// bodies, so only those two request headers are allowed.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins(config))
        .allow_methods(methods)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age_seconds))
}
