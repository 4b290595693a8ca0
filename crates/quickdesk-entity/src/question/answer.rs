//! Answers to questions. Append-only.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{AnswerId, QuestionId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An answer posted on a question.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Unique answer identifier.
    pub id: AnswerId,
    /// Parent question.
    pub question_id: QuestionId,
    /// Author.
    pub author: UserId,
    /// Body.
    pub content: String,
    /// When the answer was posted.
    pub created_at: DateTime<Utc>,
}

/// Data required to post an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnswer {
    /// Parent question.
    pub question_id: QuestionId,
    /// Author.
    pub author: UserId,
    /// Body.
    pub content: String,
}
