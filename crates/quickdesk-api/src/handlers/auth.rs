//! Registration, login, profile and role upgrade handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use quickdesk_core::types::UpgradeRequestId;
use quickdesk_entity::view::UpgradeRequestView;
use quickdesk_service::AuthSession;

use crate::dto::request::{ApproveUpgradeBody, LoginBody, ProfileBody, RegisterBody};
use crate::dto::response::{UpgradeResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson, parse_id};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RegisterBody>,
) -> ApiResult<(StatusCode, Json<AuthSession>)> {
    let session = state.account_service.register(body.into()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoginBody>,
) -> ApiResult<Json<AuthSession>> {
    let session = state
        .account_service
        .login(&body.email, &body.password)
        .await?;
    Ok(Json(session))
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = state.account_service.me(&auth).await?;
    Ok(Json(UserResponse { user }))
}

/// PUT /auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<ProfileBody>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .account_service
        .update_profile(&auth, body.into_update()?)
        .await?;
    Ok(Json(UserResponse { user }))
}

/// POST /auth/request-upgrade
pub async fn request_upgrade(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<(StatusCode, Json<UpgradeResponse>)> {
    let request = state.account_service.request_upgrade(&auth).await?;
    Ok((
        StatusCode::CREATED,
        Json(UpgradeResponse {
            message: "Upgrade request submitted".to_string(),
            request,
        }),
    ))
}

/// GET /auth/upgrade-requests
pub async fn upgrade_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UpgradeRequestView>>> {
    let requests = state.account_service.list_upgrade_requests(&auth).await?;
    Ok(Json(requests))
}

/// PUT /auth/approve-upgrade/{id}
pub async fn approve_upgrade(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ApproveUpgradeBody>,
) -> ApiResult<Json<UpgradeResponse>> {
    let id: UpgradeRequestId = parse_id(&id)?;
    let request = state
        .account_service
        .resolve_upgrade(&auth, id, body.approved)
        .await?;
    let message = if body.approved {
        "Upgrade request approved"
    } else {
        "Upgrade request rejected"
    };
    Ok(Json(UpgradeResponse {
        message: message.to_string(),
        request,
    }))
}
