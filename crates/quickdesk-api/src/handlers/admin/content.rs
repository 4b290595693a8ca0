//! Admin moderation of tickets and questions.

use axum::Json;
use axum::extract::{Path, State};

use quickdesk_core::types::{QuestionId, TicketId};

use crate::dto::response::{MessageResponse, QuestionsResponse, TicketsResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// GET /admin/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<TicketsResponse>> {
    let tickets = state.admin_service.list_tickets(&auth).await?;
    Ok(Json(TicketsResponse { tickets }))
}

/// DELETE /admin/tickets/{id}
pub async fn delete_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: TicketId = parse_id(&id)?;
    state.admin_service.delete_ticket(&auth, id).await?;
    Ok(Json(MessageResponse::deleted()))
}

/// GET /admin/questions
pub async fn list_questions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<QuestionsResponse>> {
    let questions = state.admin_service.list_questions(&auth).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// DELETE /admin/questions/{id}
pub async fn delete_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: QuestionId = parse_id(&id)?;
    state.admin_service.delete_question(&auth, id).await?;
    Ok(Json(MessageResponse::deleted()))
}
