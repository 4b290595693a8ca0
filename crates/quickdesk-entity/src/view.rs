//! Read models: entities with their references resolved.
//!
//! References are weak. A reference whose target no longer exists is
//! rendered as `null` rather than failing the read.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{
    AnswerId, CommentId, QuestionId, TicketId, UpgradeRequestId,
};
use serde::{Deserialize, Serialize};

use crate::category::CategorySummary;
use crate::question::VoteTally;
use crate::ticket::{TicketPriority, TicketStatus};
use crate::upgrade::UpgradeStatus;
use crate::user::UserSummary;

/// A ticket with creator, assignee and category attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    /// Ticket identifier.
    pub id: TicketId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Category, if it still exists.
    pub category: Option<CategorySummary>,
    /// Priority.
    pub priority: TicketPriority,
    /// Status.
    pub status: TicketStatus,
    /// Tags.
    pub tags: Vec<String>,
    /// Creator, if the account still exists.
    pub created_by: Option<UserSummary>,
    /// Assignee, if any and still existing.
    pub assigned_to: Option<UserSummary>,
    /// First resolution time.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl TicketView {
    /// Case-insensitive match over title, description and tags.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// A ticket comment with its author attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment identifier.
    pub id: CommentId,
    /// Parent ticket.
    pub ticket_id: TicketId,
    /// Author, if the account still exists.
    pub author: Option<UserSummary>,
    /// Body.
    pub content: String,
    /// Internal note flag.
    pub is_internal: bool,
    /// Posting time.
    pub created_at: DateTime<Utc>,
}

/// An answer with its author attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    /// Answer identifier.
    pub id: AnswerId,
    /// Author, if the account still exists.
    pub author: Option<UserSummary>,
    /// Body.
    pub content: String,
    /// Posting time.
    pub created_at: DateTime<Utc>,
}

/// A question with author, category, vote tally and answers attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    /// Question identifier.
    pub id: QuestionId,
    /// Title.
    pub title: String,
    /// Body.
    pub description: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Category, if it still exists.
    pub category: Option<CategorySummary>,
    /// Author, if the account still exists.
    pub created_by: Option<UserSummary>,
    /// Up and down counts.
    pub votes: VoteTally,
    /// Ups minus downs.
    pub score: i64,
    /// Answers, oldest first.
    pub answers: Vec<AnswerView>,
    /// Posting time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl QuestionView {
    /// Case-insensitive match over title, description and tags.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// An upgrade request with requester and resolver attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRequestView {
    /// Request identifier.
    pub id: UpgradeRequestId,
    /// Requesting user, if the account still exists.
    pub requester: Option<UserSummary>,
    /// Resolution state.
    pub status: UpgradeStatus,
    /// Filing time.
    pub created_at: DateTime<Utc>,
    /// Resolution time.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Resolving admin.
    pub resolved_by: Option<UserSummary>,
}
