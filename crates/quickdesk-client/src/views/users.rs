//! Admin user management.

use tracing::warn;

use quickdesk_core::types::UserId;
use quickdesk_entity::user::{User, UserRole};

use super::filter::{UserFilter, filter_users};
use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct UsersState {
    pub users: Vec<User>,
    pub filter: UserFilter,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum UsersAction {
    Loaded(Vec<User>),
    SetSearch(String),
    SetRole(String),
    /// Applied before the server confirms.
    RoleChanged { id: UserId, role: UserRole },
    /// Puts back the role a failed change replaced.
    RoleChangeReverted {
        id: UserId,
        role: UserRole,
        message: String,
    },
    Removed(UserId),
    Failed(String),
}

fn set_role(users: &mut [User], id: UserId, role: UserRole) {
    if let Some(user) = users.iter_mut().find(|u| u.id == id) {
        user.role = role;
    }
}

impl UsersState {
    pub fn reduce(mut self, action: UsersAction) -> Self {
        match action {
            UsersAction::Loaded(users) => {
                self.users = users;
                self.error = None;
            }
            UsersAction::SetSearch(search) => self.filter.search = search,
            UsersAction::SetRole(role) => self.filter.role = role,
            UsersAction::RoleChanged { id, role } => set_role(&mut self.users, id, role),
            UsersAction::RoleChangeReverted { id, role, message } => {
                set_role(&mut self.users, id, role);
                self.error = Some(message);
            }
            UsersAction::Removed(id) => self.users.retain(|u| u.id != id),
            UsersAction::Failed(message) => self.error = Some(message),
        }
        self
    }

    pub fn visible(&self) -> Vec<User> {
        filter_users(&self.users, &self.filter)
    }
}

/// Drives [`UsersState`] against the admin API.
#[derive(Debug, Clone)]
pub struct UsersView {
    client: ApiClient,
    state: UsersState,
}

impl UsersView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: UsersState::default(),
        }
    }

    pub fn state(&self) -> &UsersState {
        &self.state
    }

    pub fn dispatch(&mut self, action: UsersAction) {
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.client.admin_users().await {
            Ok(users) => {
                self.dispatch(UsersAction::Loaded(users));
                Ok(())
            }
            Err(e) => {
                self.dispatch(UsersAction::Failed(e.message.clone()));
                Err(e)
            }
        }
    }

    /// Shows the new role immediately and reverts it if the server refuses.
    pub async fn change_role(&mut self, id: UserId, role: UserRole) -> Result<(), ApiError> {
        let Some(previous) = self.state.users.iter().find(|u| u.id == id).map(|u| u.role) else {
            return Err(ApiError::new(404, "User not found"));
        };
        self.dispatch(UsersAction::RoleChanged { id, role });

        if let Err(e) = self.client.admin_change_role(id, role).await {
            warn!(user_id = %id, error = %e.message, "Role change reverted");
            self.dispatch(UsersAction::RoleChangeReverted {
                id,
                role: previous,
                message: e.message.clone(),
            });
            return Err(e);
        }
        Ok(())
    }

    pub async fn remove(&mut self, id: UserId) -> Result<(), ApiError> {
        match self.client.admin_delete_user(id).await {
            Ok(_) => {
                self.dispatch(UsersAction::Removed(id));
                Ok(())
            }
            Err(e) => {
                self.dispatch(UsersAction::Failed(e.message.clone()));
                Err(e)
            }
        }
    }
}
