//! Ticket repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{TicketId, UserId};
use quickdesk_entity::ticket::{CreateTicket, Ticket, TicketStatus, UpdateTicket};

use super::{db_error, to_count};
use crate::repositories::TicketRepository;

/// PostgreSQL-backed ticket repository.
#[derive(Debug, Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn find_by_id(&self, id: TicketId) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find ticket"))
    }

    async fn find_all(&self) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list tickets"))
    }

    async fn find_by_creator(&self, user: UserId) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "SELECT * FROM tickets WHERE created_by = $1 ORDER BY created_at DESC",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list tickets by creator"))
    }

    async fn find_by_assignee(&self, user: UserId) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "SELECT * FROM tickets WHERE assigned_to = $1 ORDER BY created_at DESC",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list tickets by assignee"))
    }

    async fn find_recent(&self, limit: u64) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets ORDER BY created_at DESC LIMIT $1")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list recent tickets"))
    }

    async fn create(&self, data: &CreateTicket) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (id, title, description, category, priority, status, tags,
                                 created_by, assigned_to, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'open', $6, $7, NULL, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(TicketId::new())
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category)
        .bind(data.priority)
        .bind(&data.tags)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create ticket"))
    }

    async fn update(&self, id: TicketId, data: &UpdateTicket) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                priority = COALESCE($5, priority),
                tags = COALESCE($6, tags),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category)
        .bind(data.priority)
        .bind(&data.tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update ticket"))
    }

    async fn set_status(&self, id: TicketId, status: TicketStatus) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets SET
                status = $2,
                resolved_at = CASE
                    WHEN $3 THEN COALESCE(resolved_at, NOW())
                    ELSE resolved_at
                END,
                updated_at = NOW()
            WHERE id = $1 AND status <> 'closed'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(status.is_resolved())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update ticket status"))
    }

    async fn claim(&self, id: TicketId, agent: UserId) -> AppResult<bool> {
        let claimed = sqlx::query_scalar::<_, TicketId>(
            r#"
            UPDATE tickets SET assigned_to = $2, updated_at = NOW()
            WHERE id = $1 AND assigned_to IS NULL AND status = 'open'
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(agent)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to claim ticket"))?;
        Ok(claimed.is_some())
    }

    async fn assign(&self, id: TicketId, agent: UserId) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET assigned_to = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(agent)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to assign ticket"))
    }

    async fn delete(&self, id: TicketId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete ticket"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error("Failed to count tickets"))
    }

    async fn count_by_status(&self, status: TicketStatus) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error("Failed to count tickets by status"))
    }

    async fn count_unassigned_open(&self) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tickets WHERE status = 'open' AND assigned_to IS NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map(to_count)
        .map_err(db_error("Failed to count pending tickets"))
    }
}
