//! Ticket comment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{CommentId, TicketId};
use quickdesk_entity::ticket::{CreateComment, TicketComment};

use super::db_error;
use crate::repositories::CommentRepository;

/// PostgreSQL-backed comment repository.
#[derive(Debug, Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, data: &CreateComment) -> AppResult<TicketComment> {
        sqlx::query_as::<_, TicketComment>(
            r#"
            INSERT INTO ticket_comments (id, ticket_id, author, content, is_internal, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(CommentId::new())
        .bind(data.ticket_id)
        .bind(data.author)
        .bind(&data.content)
        .bind(data.is_internal)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to add comment"))
    }

    async fn find_by_ticket(&self, ticket: TicketId) -> AppResult<Vec<TicketComment>> {
        sqlx::query_as::<_, TicketComment>(
            "SELECT * FROM ticket_comments WHERE ticket_id = $1 ORDER BY created_at ASC",
        )
        .bind(ticket)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list comments"))
    }
}
