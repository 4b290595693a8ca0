//! Q&A handlers. Reading is public; writing requires a signed-in caller.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use quickdesk_core::types::QuestionId;
use quickdesk_service::question::VoteResult;

use crate::dto::request::{AnswerBody, CreateQuestionBody, UpdateQuestionBody, VoteBody};
use crate::dto::response::{MessageResponse, QuestionPageResponse, QuestionResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, QuestionListParams, ValidJson, parse_id};
use crate::state::AppState;

/// GET /questions
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<QuestionListParams>,
) -> ApiResult<Json<QuestionPageResponse>> {
    let page = state.question_service.list(&params.into_query()?).await?;
    Ok(Json(page.into()))
}

/// POST /questions
pub async fn create_question(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateQuestionBody>,
) -> ApiResult<(StatusCode, Json<QuestionResponse>)> {
    let question = state
        .question_service
        .create(&auth, body.into_new_question()?)
        .await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse { question })))
}

/// GET /questions/{id}
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<QuestionResponse>> {
    let id: QuestionId = parse_id(&id)?;
    let question = state.question_service.get(id).await?;
    Ok(Json(QuestionResponse { question }))
}

/// PUT /questions/{id}
pub async fn update_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateQuestionBody>,
) -> ApiResult<Json<QuestionResponse>> {
    let id: QuestionId = parse_id(&id)?;
    let question = state
        .question_service
        .update(&auth, id, body.into_update()?)
        .await?;
    Ok(Json(QuestionResponse { question }))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: QuestionId = parse_id(&id)?;
    state.question_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::deleted()))
}

/// POST /questions/{id}/vote
pub async fn vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<VoteBody>,
) -> ApiResult<Json<VoteResult>> {
    let id: QuestionId = parse_id(&id)?;
    let result = state
        .question_service
        .vote(&auth, id, body.vote_type()?)
        .await?;
    Ok(Json(result))
}

/// POST /questions/{id}/answer
pub async fn add_answer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<AnswerBody>,
) -> ApiResult<(StatusCode, Json<QuestionResponse>)> {
    let id: QuestionId = parse_id(&id)?;
    let question = state
        .question_service
        .add_answer(&auth, id, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse { question })))
}
