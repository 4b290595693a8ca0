//! Admin category management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use quickdesk_core::types::CategoryId;

use crate::dto::request::{CreateCategoryBody, UpdateCategoryBody};
use crate::dto::response::{CategoriesResponse, CategoryResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson, parse_id};
use crate::state::AppState;

/// GET /admin/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.admin_service.list_categories(&auth).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// POST /admin/categories
pub async fn add_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateCategoryBody>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state.admin_service.add_category(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse { category })))
}

/// PUT /admin/categories/{id}
pub async fn edit_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateCategoryBody>,
) -> ApiResult<Json<CategoryResponse>> {
    let id: CategoryId = parse_id(&id)?;
    let category = state
        .admin_service
        .edit_category(&auth, id, body.into())
        .await?;
    Ok(Json(CategoryResponse { category }))
}

/// DELETE /admin/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: CategoryId = parse_id(&id)?;
    state.admin_service.delete_category(&auth, id).await?;
    Ok(Json(MessageResponse::deleted()))
}
