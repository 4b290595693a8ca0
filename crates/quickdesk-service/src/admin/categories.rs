//! Category management.

use serde::{Deserialize, Serialize};
use tracing::info;

use quickdesk_auth::SystemPermission;
use quickdesk_core::error::AppError;
use quickdesk_core::types::CategoryId;
use quickdesk_entity::category::{Category, CreateCategory, DEFAULT_CATEGORY_COLOR, UpdateCategory};

use super::AdminService;
use crate::context::RequestContext;

/// Request to add a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCategory {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Hex color; the default palette color when absent.
    pub color: Option<String>,
}

impl AdminService {
    /// Lists categories for any signed-in caller.
    pub async fn browse_categories(&self) -> Result<Vec<Category>, AppError> {
        self.store.categories.find_all().await
    }

    /// Lists categories for administration.
    pub async fn list_categories(&self, ctx: &RequestContext) -> Result<Vec<Category>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::CategoryManage)?;

        self.store.categories.find_all().await
    }

    /// Adds a category.
    pub async fn add_category(
        &self,
        ctx: &RequestContext,
        req: NewCategory,
    ) -> Result<Category, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::CategoryManage)?;

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Category name is required"));
        }

        let color = req
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());

        let category = self
            .store
            .categories
            .create(&CreateCategory {
                name: name.to_string(),
                description: req.description,
                color,
                created_by: Some(ctx.user_id),
            })
            .await?;

        info!(admin_id = %ctx.user_id, category_id = %category.id, "Category added");
        Ok(category)
    }

    /// Edits a category.
    pub async fn edit_category(
        &self,
        ctx: &RequestContext,
        category_id: CategoryId,
        update: UpdateCategory,
    ) -> Result<Category, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::CategoryManage)?;

        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Category name is required"));
        }

        self.store
            .categories
            .update(category_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Deletes a category. Tickets and questions keep the dangling id.
    pub async fn delete_category(
        &self,
        ctx: &RequestContext,
        category_id: CategoryId,
    ) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::CategoryManage)?;

        if !self.store.categories.delete(category_id).await? {
            return Err(AppError::not_found("Category not found"));
        }

        info!(admin_id = %ctx.user_id, category_id = %category_id, "Category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use quickdesk_core::error::ErrorKind;
    use quickdesk_entity::user::UserRole;

    #[tokio::test]
    async fn test_add_category_defaults_color() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let category = svc
            .add_category(
                &ctx,
                NewCategory {
                    name: "Hardware".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(category.created_by, Some(admin.id));

        let err = svc
            .add_category(&ctx, NewCategory::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_edit_and_delete_missing_category() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let err = svc
            .edit_category(&ctx, CategoryId::new(), UpdateCategory::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = svc.delete_category(&ctx, CategoryId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
