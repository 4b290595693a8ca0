//! Category entity model.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{CategoryId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Color assigned when a category is created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";

/// A grouping for tickets and questions.
///
/// Deleting a category does not touch referencing tickets or questions;
/// their reference then resolves to nothing on read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Hex color used by the UI.
    pub color: String,
    /// The admin who created it.
    pub created_by: Option<UserId>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The subset of a category attached to tickets and questions on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Hex color.
    pub color: String,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
        }
    }
}

/// Data required to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Hex color.
    pub color: String,
    /// Creating admin.
    pub created_by: Option<UserId>,
}

/// Partial update of a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New color.
    pub color: Option<String>,
}

impl UpdateCategory {
    /// Apply the update onto an in-memory category.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = Some(description.clone());
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
    }
}
