//! Ticket entity model.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{CategoryId, TicketId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{TicketPriority, TicketStatus};

/// A support request with a lifecycle status and an optional assignee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: TicketId,
    /// Short summary.
    pub title: String,
    /// Full problem description.
    pub description: String,
    /// Category reference (may dangle after the category is deleted).
    pub category: Option<CategoryId>,
    /// Priority.
    pub priority: TicketPriority,
    /// Lifecycle status.
    pub status: TicketStatus,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// The user who opened the ticket.
    pub created_by: UserId,
    /// The agent or admin working the ticket.
    pub assigned_to: Option<UserId>,
    /// When the ticket first reached a resolved status.
    pub resolved_at: Option<DateTime<Utc>>,
    /// When the ticket was created.
    pub created_at: DateTime<Utc>,
    /// When the ticket was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Whether the ticket can be claimed right now.
    pub fn is_claimable(&self) -> bool {
        self.assigned_to.is_none() && self.status == TicketStatus::Open
    }

    /// Whether `user` is the current assignee.
    pub fn is_assigned_to(&self, user: UserId) -> bool {
        self.assigned_to == Some(user)
    }

    /// Case-insensitive match over title, description and tags.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    /// Move to a new status, stamping `resolved_at` on first resolution.
    pub fn set_status(&mut self, status: TicketStatus, now: DateTime<Utc>) {
        if status.is_resolved() && self.resolved_at.is_none() {
            self.resolved_at = Some(now);
        }
        self.status = status;
        self.updated_at = now;
    }
}

/// Data required to create a new ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Optional category.
    pub category: Option<CategoryId>,
    /// Priority.
    pub priority: TicketPriority,
    /// Tags (deduplicated by the service before insert).
    pub tags: Vec<String>,
    /// Creator.
    pub created_by: UserId,
}

/// Partial update of a ticket's descriptive fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTicket {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<CategoryId>,
    /// New priority.
    pub priority: Option<TicketPriority>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
}

impl UpdateTicket {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
    }

    /// Apply the update onto an in-memory ticket.
    pub fn apply_to(&self, ticket: &mut Ticket) {
        if let Some(title) = &self.title {
            ticket.title = title.clone();
        }
        if let Some(description) = &self.description {
            ticket.description = description.clone();
        }
        if let Some(category) = self.category {
            ticket.category = Some(category);
        }
        if let Some(priority) = self.priority {
            ticket.priority = priority;
        }
        if let Some(tags) = &self.tags {
            ticket.tags = tags.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_ticket() -> Ticket {
        let now = Utc::now();
        Ticket {
            id: TicketId::new(),
            title: "Printer jam".into(),
            description: "Tray 2".into(),
            category: None,
            priority: TicketPriority::Medium,
            status: TicketStatus::Open,
            tags: vec![],
            created_by: UserId::new(),
            assigned_to: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_claimable_only_when_open_and_unassigned() {
        let mut ticket = open_ticket();
        assert!(ticket.is_claimable());
        ticket.assigned_to = Some(UserId::new());
        assert!(!ticket.is_claimable());
        ticket.assigned_to = None;
        ticket.status = TicketStatus::Answered;
        assert!(!ticket.is_claimable());
    }

    #[test]
    fn test_resolved_at_stamped_once() {
        let mut ticket = open_ticket();
        let first = Utc::now();
        ticket.set_status(TicketStatus::Resolved, first);
        ticket.set_status(TicketStatus::Closed, first + chrono::Duration::hours(1));
        assert_eq!(ticket.resolved_at, Some(first));
        assert_eq!(ticket.status, TicketStatus::Closed);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(open_ticket()).expect("serialize");
        assert!(json.get("assignedTo").is_some());
        assert!(json.get("createdBy").is_some());
        assert_eq!(json["status"], "open");
    }
}
