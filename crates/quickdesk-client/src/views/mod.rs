//! Client-side list views.
//!
//! Each view keeps the fetched collection in an explicit state value and
//! changes it only through a pure `reduce`. The visible list is re-derived
//! from `{source, filter}` on demand and never stored.

pub mod agent_panel;
pub mod filter;
pub mod users;

pub use agent_panel::{AgentPanel, AgentPanelAction, AgentPanelState};
pub use filter::{ALL, AgentTab, QuestionFilter, TicketFilter, UserFilter};
pub use users::{UsersAction, UsersState, UsersView};
