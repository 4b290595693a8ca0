//! Ticket lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use quickdesk_core::types::TicketId;
use quickdesk_entity::user::UserSummary;
use quickdesk_service::ticket::{ClaimOutcome, TicketDetail};

use crate::dto::request::{AssignBody, CommentBody, CreateTicketBody, UpdateTicketBody};
use crate::dto::response::{
    CommentResponse, CommentsResponse, MessageResponse, TicketResponse, TicketsResponse,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson, parse_id};
use crate::state::AppState;

/// GET /tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<TicketsResponse>> {
    let tickets = state.ticket_service.list(&auth).await?;
    Ok(Json(TicketsResponse { tickets }))
}

/// POST /tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateTicketBody>,
) -> ApiResult<(StatusCode, Json<TicketResponse>)> {
    let ticket = state
        .ticket_service
        .create(&auth, body.into_new_ticket()?)
        .await?;
    Ok((StatusCode::CREATED, Json(TicketResponse { ticket })))
}

/// GET /tickets/agents
pub async fn list_agents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(state.ticket_service.list_agents(&auth).await?))
}

/// GET /tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<TicketDetail>> {
    let id: TicketId = parse_id(&id)?;
    Ok(Json(state.ticket_service.get(&auth, id).await?))
}

/// PATCH /tickets/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateTicketBody>,
) -> ApiResult<Json<TicketResponse>> {
    let id: TicketId = parse_id(&id)?;
    let ticket = state
        .ticket_service
        .update(&auth, id, body.into_changes()?)
        .await?;
    Ok(Json(TicketResponse { ticket }))
}

/// DELETE /tickets/{id}
pub async fn delete_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: TicketId = parse_id(&id)?;
    state.ticket_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::deleted()))
}

/// PATCH /tickets/{id}/assign
pub async fn assign_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<AssignBody>,
) -> ApiResult<Json<TicketResponse>> {
    let id: TicketId = parse_id(&id)?;
    let ticket = state
        .ticket_service
        .assign(&auth, id, body.agent()?)
        .await?;
    Ok(Json(TicketResponse { ticket }))
}

/// POST /tickets/{id}/claim
///
/// A lost race is not an error: the body reports `claimed: false` with the
/// ticket as the winner left it.
pub async fn claim_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ClaimOutcome>> {
    let id: TicketId = parse_id(&id)?;
    Ok(Json(state.ticket_service.claim(&auth, id).await?))
}

/// GET /tickets/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<CommentsResponse>> {
    let id: TicketId = parse_id(&id)?;
    let comments = state.ticket_service.list_comments(&auth, id).await?;
    Ok(Json(CommentsResponse { comments }))
}

/// POST /tickets/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<CommentBody>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let id: TicketId = parse_id(&id)?;
    let comment = state
        .ticket_service
        .add_comment(&auth, id, &body.content, body.is_internal)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}
