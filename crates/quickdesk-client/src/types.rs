//! Request and response payloads.
//!
//! Entity shapes (`User`, `TicketView`, `QuestionView`, ...) come from
//! `quickdesk-entity`; this module holds the envelopes around them and the
//! request bodies the server accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quickdesk_core::types::{CategoryId, UserId};
use quickdesk_entity::category::Category;
use quickdesk_entity::question::VoteOutcome;
use quickdesk_entity::ticket::{TicketPriority, TicketStatus};
use quickdesk_entity::user::{User, UserRole};
use quickdesk_entity::view::{CommentView, QuestionView, TicketView, UpgradeRequestView};

/// Returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UsersEnvelope {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CategoryEnvelope {
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TicketEnvelope {
    pub ticket: TicketView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TicketsEnvelope {
    pub tickets: Vec<TicketView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentEnvelope {
    pub comment: CommentView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentsEnvelope {
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuestionEnvelope {
    pub question: QuestionView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuestionsEnvelope {
    pub questions: Vec<QuestionView>,
}

/// A ticket with its visible comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDetail {
    pub ticket: TicketView,
    pub comments: Vec<CommentView>,
}

/// Result of claiming a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimOutcome {
    /// False when another agent got there first.
    pub claimed: bool,
    pub ticket: TicketView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// One page of the public question list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPage {
    pub questions: Vec<QuestionView>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResult {
    pub outcome: VoteOutcome,
    pub question: QuestionView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeResponse {
    pub message: String,
    pub request: UpgradeRequestView,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOverview {
    pub assigned_tickets: u64,
    pub resolved_today: u64,
    pub pending_tickets: u64,
    pub total_resolved: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub answered_tickets: u64,
    pub resolved_tickets: u64,
    pub closed_tickets: u64,
    pub total_questions: u64,
}

/// One page of the dashboard ticket list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    pub tickets: Vec<TicketView>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total: u64,
}

/// Query for `GET /questions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionListQuery {
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub tag: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl QuestionListQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tag", tag.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Query for `GET /dashboard/tickets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<TicketStatus>,
    pub category: Option<CategoryId>,
    pub search: Option<String>,
    /// `newest`, `oldest` or `priority`.
    pub sort_by: Option<String>,
}

impl TicketListQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy", sort_by.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    pub tags: Vec<String>,
}

/// Partial ticket update. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
}

impl TicketUpdate {
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_in_interest: Option<Vec<CategoryId>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_in_interest: Option<Vec<CategoryId>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_in_interest: Option<Vec<CategoryId>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BulkUsers<'a> {
    pub user_ids: &'a [UserId],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_role: Option<UserRole>,
}
