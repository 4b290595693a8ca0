use async_trait::async_trait;
use chrono::Utc;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::CategoryId;
use quickdesk_entity::category::{Category, CreateCategory, UpdateCategory};

use super::store::{values, MemoryStore};
use crate::repositories::CategoryRepository;

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        Ok(self.tables.categories.get(&id).map(|c| c.clone()))
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> AppResult<Vec<Category>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.tables.categories.get(id).map(|c| c.clone()))
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let mut categories = values(&self.tables.categories);
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name: data.name.clone(),
            description: data.description.clone(),
            color: data.color.clone(),
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: CategoryId, data: &UpdateCategory) -> AppResult<Option<Category>> {
        Ok(self.tables.categories.get_mut(&id).map(|mut category| {
            data.apply_to(&mut category);
            category.updated_at = Utc::now();
            category.clone()
        }))
    }

    async fn delete(&self, id: CategoryId) -> AppResult<bool> {
        Ok(self.tables.categories.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.categories.len() as u64)
    }
}
