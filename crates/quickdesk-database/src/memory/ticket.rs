use async_trait::async_trait;
use chrono::Utc;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{CommentId, TicketId, UserId};
use quickdesk_entity::ticket::{
    CreateComment, CreateTicket, Ticket, TicketComment, TicketStatus, UpdateTicket,
};

use super::store::{newest_first, values, MemoryStore};
use crate::repositories::{CommentRepository, TicketRepository};

impl MemoryStore {
    fn tickets_where(&self, predicate: impl Fn(&Ticket) -> bool) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = self
            .tables
            .tickets
            .iter()
            .filter(|t| predicate(t.value()))
            .map(|t| t.value().clone())
            .collect();
        newest_first(&mut tickets, |t| t.created_at);
        tickets
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn find_by_id(&self, id: TicketId) -> AppResult<Option<Ticket>> {
        Ok(self.tables.tickets.get(&id).map(|t| t.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<Ticket>> {
        Ok(self.tickets_where(|_| true))
    }

    async fn find_by_creator(&self, user: UserId) -> AppResult<Vec<Ticket>> {
        Ok(self.tickets_where(|t| t.created_by == user))
    }

    async fn find_by_assignee(&self, user: UserId) -> AppResult<Vec<Ticket>> {
        Ok(self.tickets_where(|t| t.assigned_to == Some(user)))
    }

    async fn find_recent(&self, limit: u64) -> AppResult<Vec<Ticket>> {
        let mut tickets = self.tickets_where(|_| true);
        tickets.truncate(limit as usize);
        Ok(tickets)
    }

    async fn create(&self, data: &CreateTicket) -> AppResult<Ticket> {
        let now = Utc::now();
        let ticket = Ticket {
            id: TicketId::new(),
            title: data.title.clone(),
            description: data.description.clone(),
            category: data.category,
            priority: data.priority,
            status: TicketStatus::Open,
            tags: data.tags.clone(),
            created_by: data.created_by,
            assigned_to: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        };
        self.tables.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn update(&self, id: TicketId, data: &UpdateTicket) -> AppResult<Option<Ticket>> {
        Ok(self.tables.tickets.get_mut(&id).map(|mut ticket| {
            data.apply_to(&mut ticket);
            ticket.updated_at = Utc::now();
            ticket.clone()
        }))
    }

    async fn set_status(&self, id: TicketId, status: TicketStatus) -> AppResult<Option<Ticket>> {
        Ok(match self.tables.tickets.get_mut(&id) {
            Some(mut ticket) if !ticket.status.is_terminal() => {
                ticket.set_status(status, Utc::now());
                Some(ticket.clone())
            }
            _ => None,
        })
    }

    async fn claim(&self, id: TicketId, agent: UserId) -> AppResult<bool> {
        // get_mut holds the shard write lock across the check and the write.
        Ok(match self.tables.tickets.get_mut(&id) {
            Some(mut ticket) if ticket.is_claimable() => {
                ticket.assigned_to = Some(agent);
                ticket.updated_at = Utc::now();
                true
            }
            _ => false,
        })
    }

    async fn assign(&self, id: TicketId, agent: UserId) -> AppResult<Option<Ticket>> {
        Ok(self.tables.tickets.get_mut(&id).map(|mut ticket| {
            ticket.assigned_to = Some(agent);
            ticket.updated_at = Utc::now();
            ticket.clone()
        }))
    }

    async fn delete(&self, id: TicketId) -> AppResult<bool> {
        if self.tables.tickets.remove(&id).is_none() {
            return Ok(false);
        }
        self.tables.comments.retain(|_, c| c.ticket_id != id);
        Ok(true)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.tickets.len() as u64)
    }

    async fn count_by_status(&self, status: TicketStatus) -> AppResult<u64> {
        Ok(self.tables.tickets.iter().filter(|t| t.status == status).count() as u64)
    }

    async fn count_unassigned_open(&self) -> AppResult<u64> {
        Ok(self.tables.tickets.iter().filter(|t| t.is_claimable()).count() as u64)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, data: &CreateComment) -> AppResult<TicketComment> {
        let comment = TicketComment {
            id: CommentId::new(),
            ticket_id: data.ticket_id,
            author: data.author,
            content: data.content.clone(),
            is_internal: data.is_internal,
            created_at: Utc::now(),
        };
        self.tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_ticket(&self, ticket: TicketId) -> AppResult<Vec<TicketComment>> {
        let mut comments: Vec<TicketComment> = values(&self.tables.comments)
            .into_iter()
            .filter(|c| c.ticket_id == ticket)
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }
}
