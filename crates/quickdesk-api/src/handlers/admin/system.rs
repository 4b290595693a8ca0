//! Admin statistics, health, maintenance and export handlers.

use axum::Json;
use axum::extract::{Path, State};

use quickdesk_service::admin::{DashboardStats, ExportBundle, ExportType, SystemHealth};

use crate::dto::response::{DatabaseStatsResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /admin/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.admin_service.dashboard_stats(&auth).await?))
}

/// GET /admin/database/stats
pub async fn database_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DatabaseStatsResponse>> {
    let db_stats = state.admin_service.database_stats(&auth).await?;
    Ok(Json(DatabaseStatsResponse { db_stats }))
}

/// GET /admin/system/health
pub async fn system_health(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SystemHealth>> {
    Ok(Json(state.admin_service.system_health(&auth).await?))
}

/// DELETE /admin/database/{collection}
pub async fn clear_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(collection): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let outcome = state
        .admin_service
        .clear_collection(&auth, &collection)
        .await?;
    Ok(Json(MessageResponse::new(outcome.message())))
}

/// GET /admin/export/{type}
pub async fn export_data(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
) -> ApiResult<Json<ExportBundle>> {
    let export_type: ExportType = kind.parse()?;
    Ok(Json(state.admin_service.export_data(&auth, export_type).await?))
}
