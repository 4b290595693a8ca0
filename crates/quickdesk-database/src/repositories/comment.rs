//! Ticket comment repository contract.

use async_trait::async_trait;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::TicketId;
use quickdesk_entity::ticket::{CreateComment, TicketComment};

/// Persistence operations on ticket comments.
#[async_trait]
pub trait CommentRepository: Send + Sync + std::fmt::Debug {
    /// Append a comment.
    async fn create(&self, data: &CreateComment) -> AppResult<TicketComment>;

    /// Comments on a ticket, oldest first.
    async fn find_by_ticket(&self, ticket: TicketId) -> AppResult<Vec<TicketComment>>;
}
