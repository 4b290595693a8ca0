//! Ticket repository contract.

use async_trait::async_trait;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{TicketId, UserId};
use quickdesk_entity::ticket::{CreateTicket, Ticket, TicketStatus, UpdateTicket};

/// Persistence operations on tickets.
#[async_trait]
pub trait TicketRepository: Send + Sync + std::fmt::Debug {
    /// Find a ticket by primary key.
    async fn find_by_id(&self, id: TicketId) -> AppResult<Option<Ticket>>;

    /// All tickets, newest first.
    async fn find_all(&self) -> AppResult<Vec<Ticket>>;

    /// Tickets opened by `user`, newest first.
    async fn find_by_creator(&self, user: UserId) -> AppResult<Vec<Ticket>>;

    /// Tickets currently assigned to `user`, newest first.
    async fn find_by_assignee(&self, user: UserId) -> AppResult<Vec<Ticket>>;

    /// The `limit` most recently created tickets.
    async fn find_recent(&self, limit: u64) -> AppResult<Vec<Ticket>>;

    /// Insert a new ticket with status `open` and no assignee.
    async fn create(&self, data: &CreateTicket) -> AppResult<Ticket>;

    /// Apply a partial update of descriptive fields.
    async fn update(&self, id: TicketId, data: &UpdateTicket) -> AppResult<Option<Ticket>>;

    /// Set the status of a ticket that is not closed. Stamps `resolved_at`
    /// the first time the ticket reaches a resolved status. `None` when the
    /// ticket does not exist or is already closed.
    async fn set_status(&self, id: TicketId, status: TicketStatus) -> AppResult<Option<Ticket>>;

    /// Atomically assign `agent` only if the ticket is open and unassigned.
    ///
    /// Returns `true` when this call won the claim. Status is unchanged.
    async fn claim(&self, id: TicketId, agent: UserId) -> AppResult<bool>;

    /// Unconditionally set the assignee.
    async fn assign(&self, id: TicketId, agent: UserId) -> AppResult<Option<Ticket>>;

    /// Hard-delete a ticket and its comments.
    async fn delete(&self, id: TicketId) -> AppResult<bool>;

    /// Total number of tickets.
    async fn count(&self) -> AppResult<u64>;

    /// Number of tickets in `status`.
    async fn count_by_status(&self, status: TicketStatus) -> AppResult<u64>;

    /// Number of open tickets nobody has claimed.
    async fn count_unassigned_open(&self) -> AppResult<u64>;
}
