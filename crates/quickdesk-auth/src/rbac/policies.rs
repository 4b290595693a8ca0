//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use quickdesk_entity::user::UserRole;

/// A system-level permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    // Tickets
    /// Open tickets and comment on one's own tickets.
    TicketCreate,
    /// Read every ticket, not only one's own.
    TicketReadAll,
    /// Claim unassigned tickets and change status of assigned ones.
    TicketWork,
    /// Assign any ticket to any agent and change any ticket's status.
    TicketManageAll,
    /// Post comments hidden from regular users.
    CommentInternal,

    // Questions
    /// Ask, answer and vote.
    QuestionParticipate,
    /// Edit or delete anybody's question.
    QuestionModerate,

    // Accounts
    /// File a role upgrade request.
    UpgradeRequest,
    /// Approve or reject upgrade requests.
    UpgradeResolve,

    // Administration
    /// Manage categories.
    CategoryManage,
    /// Create, edit, delete and bulk-modify users.
    UserManage,
    /// Agent dashboards.
    DashboardAgent,
    /// Admin dashboards and statistics.
    DashboardAdmin,
    /// Database statistics, collection clearing and export.
    DatabaseManage,
    /// System health endpoint.
    SystemHealth,
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of permissions.
    policies: HashMap<UserRole, HashSet<SystemPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use SystemPermission::*;

        let user: HashSet<SystemPermission> =
            [TicketCreate, QuestionParticipate, UpgradeRequest].into_iter().collect();

        let mut agent: HashSet<SystemPermission> =
            [TicketCreate, QuestionParticipate, TicketReadAll, TicketWork, CommentInternal, DashboardAgent]
                .into_iter()
                .collect();

        let mut admin = agent.clone();
        admin.extend([
            TicketManageAll,
            QuestionModerate,
            UpgradeResolve,
            CategoryManage,
            UserManage,
            DashboardAdmin,
            DatabaseManage,
            SystemHealth,
        ]);
        // Agents see health too; it carries no data.
        agent.insert(SystemHealth);

        let mut policies = HashMap::new();
        policies.insert(UserRole::User, user);
        policies.insert(UserRole::Agent, agent);
        policies.insert(UserRole::Admin, admin);
        Self { policies }
    }

    /// Whether `role` holds `permission`.
    pub fn has_permission(&self, role: &UserRole, permission: &SystemPermission) -> bool {
        self.policies
            .get(role)
            .is_some_and(|set| set.contains(permission))
    }

    /// Every permission held by `role`.
    pub fn permissions_for(&self, role: &UserRole) -> HashSet<SystemPermission> {
        self.policies.get(role).cloned().unwrap_or_default()
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
