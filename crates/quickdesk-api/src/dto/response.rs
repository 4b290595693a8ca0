//! Response DTOs. Every success body carries its resource under a named key.

use serde::{Deserialize, Serialize};

use quickdesk_core::types::PageResponse;
use quickdesk_database::CollectionStats;
use quickdesk_entity::category::Category;
use quickdesk_entity::user::User;
use quickdesk_entity::view::{CommentView, QuestionView, TicketView, UpgradeRequestView};

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The body returned by every hard delete.
    pub fn deleted() -> Self {
        Self::new("Deleted")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
    pub ticket: TicketView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketsResponse {
    pub tickets: Vec<TicketView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub comment: CommentView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: QuestionView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionView>,
}

/// Page metadata of a question listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// `GET /questions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPageResponse {
    pub questions: Vec<QuestionView>,
    pub pagination: Pagination,
}

impl From<PageResponse<QuestionView>> for QuestionPageResponse {
    fn from(page: PageResponse<QuestionView>) -> Self {
        Self {
            pagination: Pagination {
                page: page.page,
                limit: page.page_size,
                total: page.total_items,
                total_pages: page.total_pages,
            },
            questions: page.items,
        }
    }
}

/// A message together with the affected upgrade request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeResponse {
    pub message: String,
    pub request: UpgradeRequestView,
}

/// `GET /admin/database/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatsResponse {
    pub db_stats: Vec<CollectionStats>,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
