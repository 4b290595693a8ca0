//! Agent and user dashboards.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quickdesk_auth::{RbacEnforcer, SystemPermission};
use quickdesk_core::error::AppError;
use quickdesk_core::types::{CategoryId, PageRequest, PageResponse};
use quickdesk_database::Store;
use quickdesk_entity::ticket::{Ticket, TicketStatus};
use quickdesk_entity::view::TicketView;

use crate::context::RequestContext;
use crate::join;

/// Workload summary for the signed-in agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOverview {
    /// Tickets assigned to the agent that are not closed.
    pub assigned_tickets: u64,
    /// The agent's tickets resolved since midnight UTC.
    pub resolved_today: u64,
    /// Open tickets nobody has claimed.
    pub pending_tickets: u64,
    /// The agent's tickets that are resolved or closed.
    pub total_resolved: u64,
}

/// Ticket and question counts for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub answered_tickets: u64,
    pub resolved_tickets: u64,
    pub closed_tickets: u64,
    pub total_questions: u64,
}

/// Ordering of the dashboard ticket list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketSort {
    #[default]
    Newest,
    Oldest,
    /// Highest priority first, newest first within a priority.
    Priority,
}

impl FromStr for TicketSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" | "" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "priority" => Ok(Self::Priority),
            other => Err(AppError::validation(format!("Invalid sort order: {other}"))),
        }
    }
}

/// Filters for the dashboard ticket list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketQuery {
    pub status: Option<TicketStatus>,
    pub category: Option<CategoryId>,
    pub search: Option<String>,
    pub sort: TicketSort,
    pub page: PageRequest,
}

/// One page of the dashboard ticket list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    pub tickets: Vec<TicketView>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total: u64,
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

fn sort_tickets(tickets: &mut [Ticket], sort: TicketSort) {
    match sort {
        TicketSort::Newest => tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TicketSort::Oldest => tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        TicketSort::Priority => tickets.sort_by(|a, b| {
            b.priority
                .numeric_priority()
                .cmp(&a.priority.numeric_priority())
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

/// Builds the dashboard read models.
#[derive(Debug, Clone)]
pub struct DashboardService {
    /// Repository bundle.
    store: Store,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(store: Store, rbac: Arc<RbacEnforcer>) -> Self {
        Self { store, rbac }
    }

    /// The caller's workload as an agent.
    pub async fn agent_overview(&self, ctx: &RequestContext) -> Result<AgentOverview, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::DashboardAgent)?;

        let mine = self.store.tickets.find_by_assignee(ctx.user_id).await?;
        let pending_tickets = self.store.tickets.count_unassigned_open().await?;
        let midnight = start_of_day(ctx.request_time);

        let mut overview = AgentOverview {
            pending_tickets,
            ..Default::default()
        };
        for ticket in &mine {
            if !ticket.status.is_terminal() {
                overview.assigned_tickets += 1;
            }
            if ticket.status.is_resolved() {
                overview.total_resolved += 1;
                if ticket.resolved_at.is_some_and(|at| at >= midnight) {
                    overview.resolved_today += 1;
                }
            }
        }
        Ok(overview)
    }

    /// The caller's ticket counts by status and question count.
    pub async fn user_stats(&self, ctx: &RequestContext) -> Result<UserStats, AppError> {
        let tickets = self.store.tickets.find_by_creator(ctx.user_id).await?;
        let total_questions = self.store.questions.count_by_creator(ctx.user_id).await?;

        let mut stats = UserStats {
            total_tickets: tickets.len() as u64,
            total_questions,
            ..Default::default()
        };
        for ticket in &tickets {
            match ticket.status {
                TicketStatus::Open => stats.open_tickets += 1,
                TicketStatus::Answered => stats.answered_tickets += 1,
                TicketStatus::Resolved => stats.resolved_tickets += 1,
                TicketStatus::Closed => stats.closed_tickets += 1,
            }
        }
        Ok(stats)
    }

    /// Filtered, sorted, paginated tickets. Staff see every ticket,
    /// regular users their own.
    pub async fn tickets(&self, ctx: &RequestContext, query: &TicketQuery) -> Result<TicketPage, AppError> {
        let scope = if self
            .rbac
            .has_permission(&ctx.role, &SystemPermission::TicketReadAll)
        {
            self.store.tickets.find_all().await?
        } else {
            self.store.tickets.find_by_creator(ctx.user_id).await?
        };

        let search = query.search.as_deref().filter(|s| !s.is_empty());
        let mut matching: Vec<Ticket> = scope
            .into_iter()
            .filter(|t| query.status.is_none_or(|s| t.status == s))
            .filter(|t| query.category.is_none_or(|c| t.category == Some(c)))
            .filter(|t| search.is_none_or(|s| t.matches_text(s)))
            .collect();
        sort_tickets(&mut matching, query.sort);

        let page = PageResponse::from_vec(matching, query.page);
        Ok(TicketPage {
            tickets: join::ticket_views(&self.store, page.items).await?,
            total_pages: page.total_pages,
            current_page: page.page,
            total: page.total_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use chrono::TimeZone;
    use quickdesk_core::error::ErrorKind;
    use quickdesk_entity::ticket::{CreateTicket, TicketPriority};
    use quickdesk_entity::user::UserRole;

    #[test]
    fn test_start_of_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 12).unwrap();
        assert_eq!(
            start_of_day(now),
            Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("Priority".parse::<TicketSort>().unwrap(), TicketSort::Priority);
        assert_eq!("".parse::<TicketSort>().unwrap(), TicketSort::Newest);
        assert_eq!(
            "random".parse::<TicketSort>().unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[tokio::test]
    async fn test_agent_overview() {
        let fx = Fixture::new();
        let user = fx.user("Ann", UserRole::User).await;
        let agent = fx.user("Agent", UserRole::Agent).await;
        let t1 = fx.ticket(&user, None).await;
        let t2 = fx.ticket(&user, None).await;
        fx.ticket(&user, None).await;
        fx.store.tickets.claim(t1.id, agent.id).await.unwrap();
        fx.store.tickets.claim(t2.id, agent.id).await.unwrap();
        fx.store
            .tickets
            .set_status(t2.id, TicketStatus::Resolved)
            .await
            .unwrap();

        let overview = fx
            .dashboard_service()
            .agent_overview(&Fixture::ctx(&agent))
            .await
            .unwrap();
        assert_eq!(overview.assigned_tickets, 2);
        assert_eq!(overview.total_resolved, 1);
        assert_eq!(overview.resolved_today, 1);
        assert_eq!(overview.pending_tickets, 1);

        let err = fx
            .dashboard_service()
            .agent_overview(&Fixture::ctx(&user))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_user_stats() {
        let fx = Fixture::new();
        let user = fx.user("Ann", UserRole::User).await;
        let t = fx.ticket(&user, None).await;
        fx.ticket(&user, None).await;
        fx.store
            .tickets
            .set_status(t.id, TicketStatus::Answered)
            .await
            .unwrap();
        fx.question(&user).await;

        let stats = fx
            .dashboard_service()
            .user_stats(&Fixture::ctx(&user))
            .await
            .unwrap();
        assert_eq!(stats.total_tickets, 2);
        assert_eq!(stats.open_tickets, 1);
        assert_eq!(stats.answered_tickets, 1);
        assert_eq!(stats.total_questions, 1);
    }

    #[tokio::test]
    async fn test_ticket_list_priority_sort_and_paging() {
        let fx = Fixture::new();
        let user = fx.user("Ann", UserRole::User).await;
        let agent = fx.user("Agent", UserRole::Agent).await;
        for (title, priority) in [
            ("Low one", TicketPriority::Low),
            ("High one", TicketPriority::High),
            ("Medium one", TicketPriority::Medium),
        ] {
            fx.store
                .tickets
                .create(&CreateTicket {
                    title: title.into(),
                    description: "details".into(),
                    category: None,
                    priority,
                    tags: vec![],
                    created_by: user.id,
                })
                .await
                .unwrap();
        }

        let page = fx
            .dashboard_service()
            .tickets(
                &Fixture::ctx(&agent),
                &TicketQuery {
                    sort: TicketSort::Priority,
                    page: PageRequest::new(1, 2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.tickets[0].title, "High one");
        assert_eq!(page.tickets[1].title, "Medium one");

        let searched = fx
            .dashboard_service()
            .tickets(
                &Fixture::ctx(&agent),
                &TicketQuery {
                    search: Some("LOW".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(searched.total, 1);
    }
}
