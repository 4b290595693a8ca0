//! Bearer authentication for handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use quickdesk_core::error::AppError;
use quickdesk_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The signed-in caller. Taking this as a handler argument makes the
/// route require a valid token for an account that still exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;

    fn deref(&self) -> &RequestContext {
        &self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;
    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.jwt_decoder.decode(token)?;

        // Reloaded per request so role changes and deletions apply at once.
        let user = state
            .store
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        Ok(Self(RequestContext::for_user(&user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(
            bearer_token(&headers("Basic Zm9v")).unwrap_err().message,
            "Invalid Authorization header format"
        );
        assert_eq!(
            bearer_token(&headers("Bearer ")).unwrap_err().message,
            "Invalid Authorization header format"
        );
        assert_eq!(
            bearer_token(&HeaderMap::new()).unwrap_err().message,
            "Missing Authorization header"
        );
    }
}
