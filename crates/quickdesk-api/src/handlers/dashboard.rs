//! Agent and user dashboard handlers.

use axum::Json;
use axum::extract::{Query, State};

use quickdesk_service::dashboard::{AgentOverview, TicketPage, UserStats};

use crate::error::ApiResult;
use crate::extractors::{AuthUser, DashboardTicketParams};
use crate::state::AppState;

/// GET /dashboard/agent/overview
pub async fn agent_overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AgentOverview>> {
    Ok(Json(state.dashboard_service.agent_overview(&auth).await?))
}

/// GET /dashboard/user/stats
pub async fn user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserStats>> {
    Ok(Json(state.dashboard_service.user_stats(&auth).await?))
}

/// GET /dashboard/tickets
pub async fn tickets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DashboardTicketParams>,
) -> ApiResult<Json<TicketPage>> {
    let query = params.into_query()?;
    Ok(Json(state.dashboard_service.tickets(&auth, &query).await?))
}
