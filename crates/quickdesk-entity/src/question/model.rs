//! Question entity model.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{CategoryId, QuestionId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A Q&A post. Votes and answers are stored as owned rows keyed by
/// `question_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique question identifier.
    pub id: QuestionId,
    /// Title.
    pub title: String,
    /// Body.
    pub description: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Category reference (may dangle).
    pub category: Option<CategoryId>,
    /// Author.
    pub created_by: UserId,
    /// When the question was posted.
    pub created_at: DateTime<Utc>,
    /// When the question was last edited.
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Case-insensitive match over title, description and tags.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Data required to post a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestion {
    /// Title.
    pub title: String,
    /// Body.
    pub description: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Optional category.
    pub category: Option<CategoryId>,
    /// Author.
    pub created_by: UserId,
}

/// Partial update of a question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQuestion {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub description: Option<String>,
    /// Replacement tags.
    pub tags: Option<Vec<String>>,
    /// New category.
    pub category: Option<CategoryId>,
}

impl UpdateQuestion {
    /// Apply the update onto an in-memory question.
    pub fn apply_to(&self, question: &mut Question) {
        if let Some(title) = &self.title {
            question.title = title.clone();
        }
        if let Some(description) = &self.description {
            question.description = description.clone();
        }
        if let Some(tags) = &self.tags {
            question.tags = tags.clone();
        }
        if let Some(category) = self.category {
            question.category = Some(category);
        }
    }
}
