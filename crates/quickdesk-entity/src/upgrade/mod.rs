//! Role upgrade request entities.

pub mod model;
pub mod status;

pub use model::RoleUpgradeRequest;
pub use status::UpgradeStatus;
