use quickdesk_entity::category::Category;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    AgentOverview, CategoriesEnvelope, TicketListQuery, TicketPage, UserStats,
};

impl ApiClient {
    pub async fn agent_overview(&self) -> Result<AgentOverview, ApiError> {
        self.get("/dashboard/agent/overview", &[]).await
    }

    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.get("/dashboard/user/stats", &[]).await
    }

    pub async fn dashboard_tickets(&self, query: &TicketListQuery) -> Result<TicketPage, ApiError> {
        self.get("/dashboard/tickets", &query.pairs()).await
    }

    /// Public category list.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let envelope: CategoriesEnvelope = self.get("/categories", &[]).await?;
        Ok(envelope.categories)
    }

    /// `GET /health` as raw JSON.
    pub async fn health(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/health", &[]).await
    }
}
