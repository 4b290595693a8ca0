//! Collection names, per-collection statistics and store health.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical collection (table) in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// User accounts.
    Users,
    /// Categories.
    Categories,
    /// Tickets.
    Tickets,
    /// Ticket comments.
    TicketComments,
    /// Questions.
    Questions,
    /// Question answers.
    Answers,
    /// Per-actor question votes.
    QuestionVotes,
    /// Role upgrade requests.
    RoleUpgradeRequests,
}

impl Collection {
    /// Every collection, in reporting order.
    pub const ALL: [Collection; 8] = [
        Self::Users,
        Self::Categories,
        Self::Tickets,
        Self::TicketComments,
        Self::Questions,
        Self::Answers,
        Self::QuestionVotes,
        Self::RoleUpgradeRequests,
    ];

    /// Physical table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Categories => "categories",
            Self::Tickets => "tickets",
            Self::TicketComments => "ticket_comments",
            Self::Questions => "questions",
            Self::Answers => "answers",
            Self::QuestionVotes => "question_votes",
            Self::RoleUpgradeRequests => "role_upgrade_requests",
        }
    }

    /// Whether the maintenance endpoint may wipe this collection.
    pub fn is_clearable(&self) -> bool {
        matches!(
            self,
            Self::Tickets | Self::Questions | Self::TicketComments | Self::RoleUpgradeRequests
        )
    }

    /// Resolve a clearable collection from a caller-supplied name.
    ///
    /// Matching ignores case and underscores, so `ticketComments`,
    /// `ticket_comments` and `TICKETCOMMENTS` are the same collection.
    /// Collections outside the clear allow-list resolve to `None`.
    pub fn clearable_from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let collection = match normalized.as_str() {
            "tickets" => Self::Tickets,
            "questions" => Self::Questions,
            "ticketcomments" => Self::TicketComments,
            "roleupgraderequests" => Self::RoleUpgradeRequests,
            _ => return None,
        };
        debug_assert!(collection.is_clearable());
        Some(collection)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// Size and shape of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    /// Collection name.
    pub name: String,
    /// Number of documents.
    pub count: u64,
    /// Data size in bytes.
    pub size: u64,
    /// Average document size in bytes.
    pub avg_obj_size: u64,
    /// Allocated storage in bytes, including indexes.
    pub storage_size: u64,
    /// Number of indexes.
    pub indexes: u64,
}

impl CollectionStats {
    /// Build stats, deriving the average object size.
    pub fn new(collection: Collection, count: u64, size: u64, storage_size: u64, indexes: u64) -> Self {
        Self {
            name: collection.table_name().to_string(),
            count,
            size,
            avg_obj_size: if count == 0 { 0 } else { size / count },
            storage_size,
            indexes,
        }
    }
}

/// Connectivity report for the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseHealth {
    /// `connected` or `disconnected`.
    pub status: String,
    /// Host the store lives on.
    pub host: String,
    /// Database name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearable_names() {
        assert_eq!(Collection::clearable_from_name("tickets"), Some(Collection::Tickets));
        assert_eq!(
            Collection::clearable_from_name("TicketComments"),
            Some(Collection::TicketComments)
        );
        assert_eq!(
            Collection::clearable_from_name("role_upgrade_requests"),
            Some(Collection::RoleUpgradeRequests)
        );
        assert_eq!(Collection::clearable_from_name("users"), None);
        assert_eq!(Collection::clearable_from_name("categories"), None);
        assert_eq!(Collection::clearable_from_name(""), None);
    }

    #[test]
    fn test_avg_obj_size() {
        let stats = CollectionStats::new(Collection::Users, 4, 1000, 4096, 2);
        assert_eq!(stats.avg_obj_size, 250);
        let empty = CollectionStats::new(Collection::Users, 0, 0, 8192, 2);
        assert_eq!(empty.avg_obj_size, 0);
    }
}
