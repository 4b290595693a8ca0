//! Dashboard statistics, database introspection, health, collection
//! clearing and data export.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{info, warn};

use quickdesk_auth::SystemPermission;
use quickdesk_core::error::AppError;
use quickdesk_database::{Collection, CollectionStats, DatabaseHealth};
use quickdesk_entity::category::Category;
use quickdesk_entity::ticket::TicketStatus;
use quickdesk_entity::user::{User, UserRole};
use quickdesk_entity::view::{QuestionView, TicketView};

use super::AdminService;
use crate::context::RequestContext;
use crate::join;

/// Number of recent users and tickets shown on the admin dashboard.
const RECENT_LIMIT: u64 = 5;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Headline counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total_users: u64,
    pub total_agents: u64,
    pub total_admins: u64,
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub closed_tickets: u64,
    pub total_questions: u64,
    pub total_categories: u64,
    pub pending_upgrade_requests: u64,
}

/// The admin dashboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Headline counts.
    pub stats: DashboardCounts,
    /// The most recently created users, newest first.
    pub recent_users: Vec<User>,
    /// The most recently created tickets, newest first.
    pub recent_tickets: Vec<TicketView>,
}

/// Process memory, formatted as `"<n>.<nn> MB"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Resident set size.
    pub rss: String,
    /// Virtual memory size.
    #[serde(rename = "virtual")]
    pub virtual_size: String,
}

/// Server half of the health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerHealth {
    /// Seconds since the process started.
    pub uptime: u64,
    /// Process memory.
    pub memory: MemoryUsage,
    /// Server version.
    pub version: String,
    /// Operating system.
    pub platform: String,
}

/// The system health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Store connectivity.
    pub database: DatabaseHealth,
    /// Process statistics.
    pub server: ServerHealth,
}

/// Result of clearing a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearOutcome {
    /// The collection name as requested.
    pub collection: String,
    /// Number of documents removed.
    pub deleted: u64,
}

impl ClearOutcome {
    /// Human-readable summary.
    pub fn message(&self) -> String {
        format!("Cleared {} documents from {}", self.deleted, self.collection)
    }
}

/// What `export_data` should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Users,
    Tickets,
    Questions,
    Categories,
    All,
}

impl ExportType {
    fn includes(self, part: ExportType) -> bool {
        self == ExportType::All || self == part
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tickets => "tickets",
            Self::Questions => "questions",
            Self::Categories => "categories",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "users" => Ok(Self::Users),
            "tickets" => Ok(Self::Tickets),
            "questions" => Ok(Self::Questions),
            "categories" => Ok(Self::Categories),
            "all" => Ok(Self::All),
            _ => Err(AppError::validation(format!("Invalid export type: {s}"))),
        }
    }
}

/// Exported collections. Parts that were not requested are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<TicketView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
}

/// An export and when it was taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub data: ExportData,
    pub exported_at: DateTime<Utc>,
}

fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// Resident memory, virtual memory and run time of this process.
fn process_stats() -> Option<(u64, u64, u64)> {
    let pid = Pid::from_u32(std::process::id());
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    sys.process(pid)
        .map(|p| (p.memory(), p.virtual_memory(), p.run_time()))
}

impl AdminService {
    /// Counts by role and status plus the most recent users and tickets.
    pub async fn dashboard_stats(&self, ctx: &RequestContext) -> Result<DashboardStats, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::DashboardAdmin)?;

        let s = &self.store;
        let (
            total_users,
            total_agents,
            total_admins,
            total_tickets,
            open_tickets,
            closed_tickets,
            total_questions,
            total_categories,
            pending_upgrade_requests,
        ) = futures::try_join!(
            s.users.count(),
            s.users.count_by_role(UserRole::Agent),
            s.users.count_by_role(UserRole::Admin),
            s.tickets.count(),
            s.tickets.count_by_status(TicketStatus::Open),
            s.tickets.count_by_status(TicketStatus::Closed),
            s.questions.count(),
            s.categories.count(),
            s.upgrades.count_pending(),
        )?;

        let recent_users = s.users.find_recent(RECENT_LIMIT).await?;
        let recent_tickets = s.tickets.find_recent(RECENT_LIMIT).await?;
        let recent_tickets = join::ticket_views(s, recent_tickets).await?;

        Ok(DashboardStats {
            stats: DashboardCounts {
                total_users,
                total_agents,
                total_admins,
                total_tickets,
                open_tickets,
                closed_tickets,
                total_questions,
                total_categories,
                pending_upgrade_requests,
            },
            recent_users,
            recent_tickets,
        })
    }

    /// Per-collection size statistics.
    pub async fn database_stats(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<CollectionStats>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::DatabaseManage)?;

        self.store.maintenance.collection_stats().await
    }

    /// Store connectivity and process statistics.
    pub async fn system_health(&self, ctx: &RequestContext) -> Result<SystemHealth, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::SystemHealth)?;

        let database = match self.store.maintenance.health().await {
            Ok(health) => health,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                DatabaseHealth {
                    status: "disconnected".to_string(),
                    host: "unknown".to_string(),
                    name: "unknown".to_string(),
                }
            }
        };

        let (rss, virtual_size, uptime) = tokio::task::spawn_blocking(process_stats)
            .await
            .map_err(|e| AppError::internal(format!("Process stats task failed: {e}")))?
            .unwrap_or_default();

        Ok(SystemHealth {
            database,
            server: ServerHealth {
                uptime,
                memory: MemoryUsage {
                    rss: format_mb(rss),
                    virtual_size: format_mb(virtual_size),
                },
                version: env!("CARGO_PKG_VERSION").to_string(),
                platform: std::env::consts::OS.to_string(),
            },
        })
    }

    /// Deletes every document of an allow-listed collection.
    pub async fn clear_collection(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<ClearOutcome, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::DatabaseManage)?;

        let collection = Collection::clearable_from_name(name)
            .ok_or_else(|| AppError::validation("Collection not allowed for clearing"))?;

        let deleted = self.store.maintenance.clear(collection).await?;
        warn!(
            admin_id = %ctx.user_id,
            collection = %collection,
            deleted,
            "Collection cleared"
        );

        Ok(ClearOutcome {
            collection: name.to_string(),
            deleted,
        })
    }

    /// Exports the collections selected by `export_type`.
    pub async fn export_data(
        &self,
        ctx: &RequestContext,
        export_type: ExportType,
    ) -> Result<ExportBundle, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::DatabaseManage)?;

        let s = &self.store;
        let mut data = ExportData::default();

        if export_type.includes(ExportType::Users) {
            data.users = Some(s.users.find_all().await?);
        }
        if export_type.includes(ExportType::Tickets) {
            let tickets = s.tickets.find_all().await?;
            data.tickets = Some(join::ticket_views(s, tickets).await?);
        }
        if export_type.includes(ExportType::Questions) {
            let questions = s.questions.find_all().await?;
            data.questions = Some(join::question_views(s, questions).await?);
        }
        if export_type.includes(ExportType::Categories) {
            data.categories = Some(s.categories.find_all().await?);
        }

        info!(admin_id = %ctx.user_id, export_type = %export_type, "Data exported");
        Ok(ExportBundle {
            data,
            exported_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use quickdesk_core::error::ErrorKind;
    use quickdesk_core::types::TicketId;

    #[tokio::test]
    async fn test_dashboard_counts() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        fx.user("Agent", UserRole::Agent).await;
        let user = fx.user("Ann", UserRole::User).await;
        fx.ticket(&user, None).await;
        let closed: TicketId = fx.ticket(&user, None).await.id;
        fx.store
            .tickets
            .set_status(closed, TicketStatus::Closed)
            .await
            .unwrap();

        let dash = fx
            .admin_service()
            .dashboard_stats(&Fixture::ctx(&admin))
            .await
            .unwrap();
        assert_eq!(dash.stats.total_users, 3);
        assert_eq!(dash.stats.total_agents, 1);
        assert_eq!(dash.stats.total_admins, 1);
        assert_eq!(dash.stats.total_tickets, 2);
        assert_eq!(dash.stats.open_tickets, 1);
        assert_eq!(dash.stats.closed_tickets, 1);
        assert_eq!(dash.recent_users.len(), 3);
        assert_eq!(dash.recent_tickets.len(), 2);
    }

    #[tokio::test]
    async fn test_clear_collection_allow_list() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let user = fx.user("Ann", UserRole::User).await;
        fx.ticket(&user, None).await;
        fx.ticket(&user, None).await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let err = svc.clear_collection(&ctx, "users").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(fx.store.users.count().await.unwrap(), 2);

        let outcome = svc.clear_collection(&ctx, "Tickets").await.unwrap();
        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.message(), "Cleared 2 documents from Tickets");
        assert_eq!(fx.store.tickets.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_export_selects_parts() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        fx.category("Network").await;
        let svc = fx.admin_service();
        let ctx = Fixture::ctx(&admin);

        let bundle = svc.export_data(&ctx, ExportType::Users).await.unwrap();
        assert_eq!(bundle.data.users.as_ref().unwrap().len(), 1);
        assert!(bundle.data.categories.is_none());
        let json = serde_json::to_value(&bundle).unwrap();
        assert!(json["data"].get("tickets").is_none());
        assert!(json.get("exportedAt").is_some());

        let all = svc.export_data(&ctx, ExportType::All).await.unwrap();
        assert_eq!(all.data.categories.unwrap().len(), 1);
        assert!(all.data.tickets.unwrap().is_empty());
    }

    #[test]
    fn test_export_type_parse() {
        assert_eq!("ALL".parse::<ExportType>().unwrap(), ExportType::All);
        let err = "sessions".parse::<ExportType>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(0), "0.00 MB");
        assert_eq!(format_mb(3 * 1024 * 1024 + 512 * 1024), "3.50 MB");
    }

    #[tokio::test]
    async fn test_system_health_reports_store() {
        let fx = Fixture::new();
        let admin = fx.user("Root", UserRole::Admin).await;
        let health = fx
            .admin_service()
            .system_health(&Fixture::ctx(&admin))
            .await
            .unwrap();
        assert_eq!(health.database.status, "connected");
        assert!(health.server.memory.rss.ends_with(" MB"));
        let json = serde_json::to_value(&health).unwrap();
        assert!(json["server"]["memory"].get("virtual").is_some());
    }
}
