//! Ticket comment entity.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{CommentId, TicketId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment on a ticket. Owned by the ticket and deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketComment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Parent ticket.
    pub ticket_id: TicketId,
    /// Author.
    pub author: UserId,
    /// Body text.
    pub content: String,
    /// Internal notes are visible to agents and admins only.
    pub is_internal: bool,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// Data required to add a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Parent ticket.
    pub ticket_id: TicketId,
    /// Author.
    pub author: UserId,
    /// Body text.
    pub content: String,
    /// Internal flag (already downgraded for non-staff authors).
    pub is_internal: bool,
}
