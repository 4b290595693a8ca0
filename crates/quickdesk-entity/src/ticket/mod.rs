//! Ticket domain entities.

pub mod comment;
pub mod model;
pub mod status;

pub use comment::{CreateComment, TicketComment};
pub use model::{CreateTicket, Ticket, UpdateTicket};
pub use status::{TicketPriority, TicketStatus};
