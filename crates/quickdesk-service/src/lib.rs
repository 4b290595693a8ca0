//! # quickdesk-service
//!
//! Business logic service layer for QuickDesk. Each service orchestrates
//! the repositories of a [`quickdesk_database::Store`] together with the
//! auth primitives to implement one area of the application.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time and are cheap to clone.

pub mod account;
pub mod admin;
pub mod context;
pub mod dashboard;
pub mod join;
pub mod question;
pub mod ticket;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{AccountService, AuthSession, ProfileUpdate, RegisterRequest};
pub use admin::{AdminService, ExportType, NewCategory, NewUser};
pub use context::RequestContext;
pub use dashboard::{DashboardService, TicketQuery, TicketSort};
pub use question::{NewQuestion, QuestionQuery, QuestionService};
pub use ticket::{NewTicket, TicketChanges, TicketService};
