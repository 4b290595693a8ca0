//! Admin views over every ticket and question.

use tracing::info;

use quickdesk_auth::SystemPermission;
use quickdesk_core::error::AppError;
use quickdesk_core::types::{QuestionId, TicketId};
use quickdesk_entity::view::{QuestionView, TicketView};

use super::AdminService;
use crate::context::RequestContext;
use crate::join;

impl AdminService {
    /// Every ticket with creator, assignee and category attached.
    pub async fn list_tickets(&self, ctx: &RequestContext) -> Result<Vec<TicketView>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::TicketManageAll)?;

        let tickets = self.store.tickets.find_all().await?;
        join::ticket_views(&self.store, tickets).await
    }

    /// Hard-deletes a ticket and its comments.
    pub async fn delete_ticket(
        &self,
        ctx: &RequestContext,
        ticket_id: TicketId,
    ) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::TicketManageAll)?;

        if !self.store.tickets.delete(ticket_id).await? {
            return Err(AppError::not_found("Ticket not found"));
        }

        info!(admin_id = %ctx.user_id, ticket_id = %ticket_id, "Admin deleted ticket");
        Ok(())
    }

    /// Every question with author, category, votes and answers attached.
    pub async fn list_questions(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<QuestionView>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::QuestionModerate)?;

        let questions = self.store.questions.find_all().await?;
        join::question_views(&self.store, questions).await
    }

    /// Hard-deletes a question with its answers and votes.
    pub async fn delete_question(
        &self,
        ctx: &RequestContext,
        question_id: QuestionId,
    ) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::QuestionModerate)?;

        if !self.store.questions.delete(question_id).await? {
            return Err(AppError::not_found("Question not found"));
        }

        info!(admin_id = %ctx.user_id, question_id = %question_id, "Admin deleted question");
        Ok(())
    }
}
