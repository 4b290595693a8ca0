use reqwest::Method;
use serde_json::json;

use quickdesk_core::types::{TicketId, UserId};
use quickdesk_entity::user::UserSummary;
use quickdesk_entity::view::{CommentView, TicketView};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    ClaimOutcome, CommentEnvelope, CommentsEnvelope, Message, NewTicket, TicketDetail,
    TicketEnvelope, TicketUpdate, TicketsEnvelope,
};

impl ApiClient {
    /// Tickets visible to the caller.
    pub async fn tickets(&self) -> Result<Vec<TicketView>, ApiError> {
        let envelope: TicketsEnvelope = self.get("/tickets", &[]).await?;
        Ok(envelope.tickets)
    }

    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<TicketView, ApiError> {
        let envelope: TicketEnvelope = self.send(Method::POST, "/tickets", ticket).await?;
        Ok(envelope.ticket)
    }

    pub async fn ticket(&self, id: TicketId) -> Result<TicketDetail, ApiError> {
        self.get(&format!("/tickets/{id}"), &[]).await
    }

    pub async fn update_ticket(&self, id: TicketId, update: &TicketUpdate) -> Result<TicketView, ApiError> {
        let envelope: TicketEnvelope = self
            .send(Method::PATCH, &format!("/tickets/{id}"), update)
            .await?;
        Ok(envelope.ticket)
    }

    pub async fn delete_ticket(&self, id: TicketId) -> Result<Message, ApiError> {
        self.call(Method::DELETE, &format!("/tickets/{id}")).await
    }

    /// Assigns a ticket. `None` clears the assignee.
    pub async fn assign_ticket(&self, id: TicketId, agent: Option<UserId>) -> Result<TicketView, ApiError> {
        let envelope: TicketEnvelope = self
            .send(
                Method::PATCH,
                &format!("/tickets/{id}/assign"),
                &json!({ "agentId": agent }),
            )
            .await?;
        Ok(envelope.ticket)
    }

    pub async fn claim_ticket(&self, id: TicketId) -> Result<ClaimOutcome, ApiError> {
        self.call(Method::POST, &format!("/tickets/{id}/claim")).await
    }

    pub async fn agents(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.get("/tickets/agents", &[]).await
    }

    pub async fn comments(&self, id: TicketId) -> Result<Vec<CommentView>, ApiError> {
        let envelope: CommentsEnvelope = self.get(&format!("/tickets/{id}/comments"), &[]).await?;
        Ok(envelope.comments)
    }

    pub async fn add_comment(
        &self,
        id: TicketId,
        content: &str,
        is_internal: bool,
    ) -> Result<CommentView, ApiError> {
        let envelope: CommentEnvelope = self
            .send(
                Method::POST,
                &format!("/tickets/{id}/comments"),
                &json!({ "content": content, "isInternal": is_internal }),
            )
            .await?;
        Ok(envelope.comment)
    }
}
