//! Admin-only routes. System payloads are returned as raw JSON.

use reqwest::Method;
use serde_json::{Value, json};

use quickdesk_core::types::{CategoryId, QuestionId, TicketId, UserId};
use quickdesk_entity::category::Category;
use quickdesk_entity::user::{User, UserRole};
use quickdesk_entity::view::{QuestionView, TicketView};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    BulkUsers, CategoriesEnvelope, CategoryEnvelope, CategoryUpdate, Message, NewCategory,
    NewUser, QuestionsEnvelope, TicketsEnvelope, UserEnvelope, UserUpdate, UsersEnvelope,
};

impl ApiClient {
    pub async fn admin_users(&self) -> Result<Vec<User>, ApiError> {
        let envelope: UsersEnvelope = self.get("/admin/users", &[]).await?;
        Ok(envelope.users)
    }

    pub async fn admin_create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.send(Method::POST, "/admin/users", user).await?;
        Ok(envelope.user)
    }

    pub async fn admin_update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .send(Method::PUT, &format!("/admin/users/{id}"), update)
            .await?;
        Ok(envelope.user)
    }

    pub async fn admin_change_role(&self, id: UserId, role: UserRole) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .send(
                Method::PUT,
                &format!("/admin/users/{id}/role"),
                &json!({ "role": role }),
            )
            .await?;
        Ok(envelope.user)
    }

    pub async fn admin_reset_password(&self, id: UserId, new_password: &str) -> Result<Message, ApiError> {
        self.send(
            Method::PUT,
            &format!("/admin/users/{id}/reset-password"),
            &json!({ "newPassword": new_password }),
        )
        .await
    }

    pub async fn admin_delete_user(&self, id: UserId) -> Result<Message, ApiError> {
        self.call(Method::DELETE, &format!("/admin/users/{id}")).await
    }

    pub async fn admin_bulk_delete(&self, ids: &[UserId]) -> Result<Message, ApiError> {
        let body = BulkUsers {
            user_ids: ids,
            new_role: None,
        };
        self.send(Method::DELETE, "/admin/users/bulk", &body).await
    }

    pub async fn admin_bulk_change_roles(&self, ids: &[UserId], role: UserRole) -> Result<Message, ApiError> {
        let body = BulkUsers {
            user_ids: ids,
            new_role: Some(role),
        };
        self.send(Method::PUT, "/admin/users/bulk/roles", &body).await
    }

    pub async fn admin_categories(&self) -> Result<Vec<Category>, ApiError> {
        let envelope: CategoriesEnvelope = self.get("/admin/categories", &[]).await?;
        Ok(envelope.categories)
    }

    pub async fn admin_add_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let envelope: CategoryEnvelope = self
            .send(Method::POST, "/admin/categories", category)
            .await?;
        Ok(envelope.category)
    }

    pub async fn admin_edit_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> Result<Category, ApiError> {
        let envelope: CategoryEnvelope = self
            .send(Method::PUT, &format!("/admin/categories/{id}"), update)
            .await?;
        Ok(envelope.category)
    }

    pub async fn admin_delete_category(&self, id: CategoryId) -> Result<Message, ApiError> {
        self.call(Method::DELETE, &format!("/admin/categories/{id}")).await
    }

    pub async fn admin_tickets(&self) -> Result<Vec<TicketView>, ApiError> {
        let envelope: TicketsEnvelope = self.get("/admin/tickets", &[]).await?;
        Ok(envelope.tickets)
    }

    pub async fn admin_delete_ticket(&self, id: TicketId) -> Result<Message, ApiError> {
        self.call(Method::DELETE, &format!("/admin/tickets/{id}")).await
    }

    pub async fn admin_questions(&self) -> Result<Vec<QuestionView>, ApiError> {
        let envelope: QuestionsEnvelope = self.get("/admin/questions", &[]).await?;
        Ok(envelope.questions)
    }

    pub async fn admin_delete_question(&self, id: QuestionId) -> Result<Message, ApiError> {
        self.call(Method::DELETE, &format!("/admin/questions/{id}")).await
    }

    pub async fn admin_dashboard_stats(&self) -> Result<Value, ApiError> {
        self.get("/admin/dashboard/stats", &[]).await
    }

    pub async fn admin_database_stats(&self) -> Result<Value, ApiError> {
        self.get("/admin/database/stats", &[]).await
    }

    pub async fn admin_system_health(&self) -> Result<Value, ApiError> {
        self.get("/admin/system/health", &[]).await
    }

    pub async fn admin_clear_collection(&self, collection: &str) -> Result<Message, ApiError> {
        self.call(Method::DELETE, &format!("/admin/database/{collection}"))
            .await
    }

    pub async fn admin_export(&self, kind: &str) -> Result<Value, ApiError> {
        self.get(&format!("/admin/export/{kind}"), &[]).await
    }
}
