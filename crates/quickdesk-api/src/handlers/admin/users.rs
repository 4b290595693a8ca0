//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use quickdesk_core::types::UserId;
use quickdesk_entity::user::UserRole;

use crate::dto::request::{
    BulkDeleteBody, BulkRolesBody, ChangeRoleBody, CreateUserBody, ResetPasswordBody,
    UpdateUserBody,
};
use crate::dto::response::{MessageResponse, UserResponse, UsersResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson, parse_id};
use crate::state::AppState;

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UsersResponse>> {
    let users = state.admin_service.list_users(&auth).await?;
    Ok(Json(UsersResponse { users }))
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateUserBody>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .admin_service
        .create_user(&auth, body.into_new_user()?)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// PUT /admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateUserBody>,
) -> ApiResult<Json<UserResponse>> {
    let id: UserId = parse_id(&id)?;
    let user = state
        .admin_service
        .update_user(&auth, id, body.into_update()?)
        .await?;
    Ok(Json(UserResponse { user }))
}

/// PUT /admin/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ChangeRoleBody>,
) -> ApiResult<Json<UserResponse>> {
    let id: UserId = parse_id(&id)?;
    let role: UserRole = body.role.parse()?;
    let user = state.admin_service.change_user_role(&auth, id, role).await?;
    Ok(Json(UserResponse { user }))
}

/// PUT /admin/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ResetPasswordBody>,
) -> ApiResult<Json<MessageResponse>> {
    let id: UserId = parse_id(&id)?;
    state
        .admin_service
        .reset_user_password(&auth, id, body.new_password.as_deref())
        .await?;
    Ok(Json(MessageResponse::new("Password reset successfully")))
}

/// DELETE /admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: UserId = parse_id(&id)?;
    state.admin_service.delete_user(&auth, id).await?;
    Ok(Json(MessageResponse::deleted()))
}

/// DELETE /admin/users/bulk
pub async fn bulk_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<BulkDeleteBody>,
) -> ApiResult<Json<MessageResponse>> {
    let ids = body.ids()?;
    let deleted = state.admin_service.bulk_delete_users(&auth, &ids).await?;
    Ok(Json(MessageResponse::new(format!("Deleted {deleted} users"))))
}

/// PUT /admin/users/bulk/roles
pub async fn bulk_change_roles(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<BulkRolesBody>,
) -> ApiResult<Json<MessageResponse>> {
    let ids = body.ids()?;
    let role = body.role()?;
    let updated = state
        .admin_service
        .bulk_change_user_roles(&auth, &ids, role)
        .await?;
    let role = role.map(|r| r.as_str()).unwrap_or_default();
    Ok(Json(MessageResponse::new(format!(
        "Updated {updated} users to {role} role"
    ))))
}
