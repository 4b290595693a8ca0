//! Admin controller: user, category and content management plus
//! dashboard statistics and database maintenance.

pub mod categories;
pub mod content;
pub mod system;
pub mod users;

use std::sync::Arc;

use quickdesk_auth::{PasswordHasher, PasswordValidator, RbacEnforcer};
use quickdesk_database::Store;

pub use categories::NewCategory;
pub use system::{
    ClearOutcome, DashboardCounts, DashboardStats, ExportBundle, ExportData, ExportType,
    MemoryUsage, ServerHealth, SystemHealth,
};
pub use users::NewUser;

/// Handles every operation behind the `/admin` routes.
#[derive(Debug, Clone)]
pub struct AdminService {
    /// Repository bundle.
    store: Store,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(
        store: Store,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            store,
            hasher,
            validator,
            rbac,
        }
    }
}
