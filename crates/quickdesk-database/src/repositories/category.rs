//! Category repository contract.

use async_trait::async_trait;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::CategoryId;
use quickdesk_entity::category::{Category, CreateCategory, UpdateCategory};

/// Persistence operations on categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync + std::fmt::Debug {
    /// Find a category by primary key.
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>>;

    /// Fetch every category whose id is in `ids`.
    async fn find_by_ids(&self, ids: &[CategoryId]) -> AppResult<Vec<Category>>;

    /// All categories ordered by name.
    async fn find_all(&self) -> AppResult<Vec<Category>>;

    /// Insert a new category.
    async fn create(&self, data: &CreateCategory) -> AppResult<Category>;

    /// Apply a partial update.
    async fn update(&self, id: CategoryId, data: &UpdateCategory) -> AppResult<Option<Category>>;

    /// Hard-delete a category. References to it are left in place.
    async fn delete(&self, id: CategoryId) -> AppResult<bool>;

    /// Total number of categories.
    async fn count(&self) -> AppResult<u64>;
}
