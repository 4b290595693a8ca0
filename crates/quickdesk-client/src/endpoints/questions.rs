use reqwest::Method;
use serde_json::json;

use quickdesk_core::types::QuestionId;
use quickdesk_entity::question::VoteType;
use quickdesk_entity::view::QuestionView;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    Message, NewQuestion, QuestionEnvelope, QuestionListQuery, QuestionPage, QuestionUpdate,
    VoteResult,
};

impl ApiClient {
    pub async fn questions(&self, query: &QuestionListQuery) -> Result<QuestionPage, ApiError> {
        self.get("/questions", &query.pairs()).await
    }

    pub async fn question(&self, id: QuestionId) -> Result<QuestionView, ApiError> {
        let envelope: QuestionEnvelope = self.get(&format!("/questions/{id}"), &[]).await?;
        Ok(envelope.question)
    }

    pub async fn create_question(&self, question: &NewQuestion) -> Result<QuestionView, ApiError> {
        let envelope: QuestionEnvelope = self.send(Method::POST, "/questions", question).await?;
        Ok(envelope.question)
    }

    pub async fn update_question(
        &self,
        id: QuestionId,
        update: &QuestionUpdate,
    ) -> Result<QuestionView, ApiError> {
        let envelope: QuestionEnvelope = self
            .send(Method::PUT, &format!("/questions/{id}"), update)
            .await?;
        Ok(envelope.question)
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<Message, ApiError> {
        self.call(Method::DELETE, &format!("/questions/{id}")).await
    }

    pub async fn vote(&self, id: QuestionId, vote: VoteType) -> Result<VoteResult, ApiError> {
        self.send(
            Method::POST,
            &format!("/questions/{id}/vote"),
            &json!({ "type": vote }),
        )
        .await
    }

    /// Posts an answer and returns the question with it appended.
    pub async fn answer(&self, id: QuestionId, content: &str) -> Result<QuestionView, ApiError> {
        let envelope: QuestionEnvelope = self
            .send(
                Method::POST,
                &format!("/questions/{id}/answer"),
                &json!({ "content": content }),
            )
            .await?;
        Ok(envelope.question)
    }
}
