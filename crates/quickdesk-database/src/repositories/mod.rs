//! Repository traits.
//!
//! Each trait covers one collection. Services depend only on these traits
//! through [`crate::Store`], so the PostgreSQL and in-memory backends are
//! interchangeable.

pub mod category;
pub mod comment;
pub mod maintenance;
pub mod question;
pub mod ticket;
pub mod upgrade;
pub mod user;

pub use category::CategoryRepository;
pub use comment::CommentRepository;
pub use maintenance::MaintenanceRepository;
pub use question::QuestionRepository;
pub use ticket::TicketRepository;
pub use upgrade::UpgradeRequestRepository;
pub use user::UserRepository;
