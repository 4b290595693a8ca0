//! Admin handlers mounted under `/admin`. Every operation is authorized
//! by the admin service against the caller's role.

pub mod categories;
pub mod content;
pub mod system;
pub mod users;
