//! The agent's ticket queue.

use tracing::warn;

use quickdesk_core::types::{TicketId, UserId};
use quickdesk_entity::ticket::TicketStatus;
use quickdesk_entity::view::TicketView;

use super::filter::{AgentTab, TicketFilter, filter_tickets};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AgentOverview, TicketUpdate};

#[derive(Debug, Clone, Default)]
pub struct AgentPanelState {
    /// The signed-in agent.
    pub actor: UserId,
    pub tickets: Vec<TicketView>,
    pub overview: AgentOverview,
    pub filter: TicketFilter,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AgentPanelAction {
    LoadStarted,
    Loaded {
        tickets: Vec<TicketView>,
        overview: AgentOverview,
    },
    Failed(String),
    SetSearch(String),
    SetStatus(String),
    SetPriority(String),
    SetTab(AgentTab),
}

impl AgentPanelState {
    pub fn new(actor: UserId) -> Self {
        Self {
            actor,
            ..Default::default()
        }
    }

    /// Applies `action` and returns the next state.
    pub fn reduce(mut self, action: AgentPanelAction) -> Self {
        match action {
            AgentPanelAction::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            AgentPanelAction::Loaded { tickets, overview } => {
                self.tickets = tickets;
                self.overview = overview;
                self.loading = false;
            }
            AgentPanelAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            AgentPanelAction::SetSearch(search) => self.filter.search = search,
            AgentPanelAction::SetStatus(status) => self.filter.status = status,
            AgentPanelAction::SetPriority(priority) => self.filter.priority = priority,
            AgentPanelAction::SetTab(tab) => self.filter.tab = tab,
        }
        self
    }

    /// The tickets currently shown.
    pub fn visible(&self) -> Vec<TicketView> {
        filter_tickets(&self.tickets, &self.filter, self.actor)
    }
}

/// Drives [`AgentPanelState`] against the API. Every mutation is followed
/// by a full refetch.
#[derive(Debug, Clone)]
pub struct AgentPanel {
    client: ApiClient,
    state: AgentPanelState,
}

impl AgentPanel {
    pub fn new(client: ApiClient, actor: UserId) -> Self {
        Self {
            client,
            state: AgentPanelState::new(actor),
        }
    }

    pub fn state(&self) -> &AgentPanelState {
        &self.state
    }

    pub fn dispatch(&mut self, action: AgentPanelAction) {
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    /// Fetches the ticket list and the overview counters.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.dispatch(AgentPanelAction::LoadStarted);
        let fetched = async {
            let tickets = self.client.tickets().await?;
            let overview = self.client.agent_overview().await?;
            Ok::<_, ApiError>((tickets, overview))
        }
        .await;

        match fetched {
            Ok((tickets, overview)) => {
                self.dispatch(AgentPanelAction::Loaded { tickets, overview });
                Ok(())
            }
            Err(e) => {
                warn!(status = e.status, error = %e.message, "Agent panel load failed");
                self.dispatch(AgentPanelAction::Failed(e.message.clone()));
                Err(e)
            }
        }
    }

    /// Claims the ticket for the signed-in agent. Returns whether the claim
    /// won.
    pub async fn assign_to_self(&mut self, id: TicketId) -> Result<bool, ApiError> {
        let claimed = match self.client.claim_ticket(id).await {
            Ok(outcome) => outcome.claimed,
            Err(e) => {
                self.dispatch(AgentPanelAction::Failed(e.message.clone()));
                return Err(e);
            }
        };
        self.load().await?;
        Ok(claimed)
    }

    pub async fn update_status(&mut self, id: TicketId, status: TicketStatus) -> Result<(), ApiError> {
        if let Err(e) = self
            .client
            .update_ticket(id, &TicketUpdate::status(status))
            .await
        {
            self.dispatch(AgentPanelAction::Failed(e.message.clone()));
            return Err(e);
        }
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::filter::fixtures::{summary, ticket};

    #[test]
    fn test_reduce_load_cycle() {
        let state = AgentPanelState::new(UserId::new()).reduce(AgentPanelAction::LoadStarted);
        assert!(state.loading);

        let state = state.reduce(AgentPanelAction::Loaded {
            tickets: vec![ticket("A", TicketStatus::Open)],
            overview: AgentOverview {
                pending_tickets: 1,
                ..Default::default()
            },
        });
        assert!(!state.loading);
        assert_eq!(state.tickets.len(), 1);
        assert_eq!(state.overview.pending_tickets, 1);

        let state = state.reduce(AgentPanelAction::Failed("Request failed".into()));
        assert_eq!(state.error.as_deref(), Some("Request failed"));
        assert_eq!(state.tickets.len(), 1);
    }

    #[test]
    fn test_visible_follows_filter() {
        let me = UserId::new();
        let mut mine = ticket("Mine", TicketStatus::Open);
        mine.assigned_to = Some(summary(me));
        let state = AgentPanelState::new(me)
            .reduce(AgentPanelAction::Loaded {
                tickets: vec![mine, ticket("Other", TicketStatus::Resolved)],
                overview: AgentOverview::default(),
            })
            .reduce(AgentPanelAction::SetTab(AgentTab::Assigned));
        assert_eq!(state.visible()[0].title, "Mine");

        let state = state
            .reduce(AgentPanelAction::SetTab(AgentTab::All))
            .reduce(AgentPanelAction::SetStatus("resolved".into()));
        assert_eq!(state.visible()[0].title, "Other");
        assert_eq!(state.tickets.len(), 2);
    }
}
