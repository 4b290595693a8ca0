//! Public category listing.

use axum::Json;
use axum::extract::State;

use crate::dto::response::CategoriesResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.admin_service.browse_categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}
