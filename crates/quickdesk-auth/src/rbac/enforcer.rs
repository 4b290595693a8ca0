//! RBAC enforcement: checks whether a role has a required permission.

use quickdesk_core::error::AppError;
use quickdesk_entity::user::UserRole;

use super::policies::{RbacPolicies, SystemPermission};

/// Enforces role-based access control for system-level operations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Returns `Ok(())` if allowed, or a Forbidden error if denied.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: &SystemPermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the required permission (returns bool).
    pub fn has_permission(&self, role: &UserRole, permission: &SystemPermission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Checks whether the given role is at least the specified minimum role.
    ///
    /// Role hierarchy: Admin > Agent > User
    pub fn require_minimum_role(
        &self,
        actual_role: &UserRole,
        minimum_role: &UserRole,
    ) -> Result<(), AppError> {
        if actual_role.has_at_least(minimum_role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{actual_role}' is insufficient; minimum required: '{minimum_role}'"
            )))
        }
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickdesk_core::error::ErrorKind;

    #[test]
    fn test_denied_is_forbidden() {
        let err = RbacEnforcer::new()
            .require_permission(&UserRole::User, &SystemPermission::UserManage)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_minimum_role() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.require_minimum_role(&UserRole::Admin, &UserRole::Agent).is_ok());
        assert!(rbac.require_minimum_role(&UserRole::User, &UserRole::Agent).is_err());
    }
}
