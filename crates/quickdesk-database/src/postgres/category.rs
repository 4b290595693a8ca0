//! Category repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::CategoryId;
use quickdesk_entity::category::{Category, CreateCategory, UpdateCategory};

use super::{db_error, to_count};
use crate::repositories::CategoryRepository;

/// PostgreSQL-backed category repository.
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find category"))
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> AppResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find categories by id"))
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list categories"))
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, description, color, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(CategoryId::new())
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.color)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create category"))
    }

    async fn update(&self, id: CategoryId, data: &UpdateCategory) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                color = COALESCE($4, color),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update category"))
    }

    async fn delete(&self, id: CategoryId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete category"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error("Failed to count categories"))
    }
}
