//! Role hierarchy and workflow gates

use content_types::Role;

/// `admin` and `super_admin` bypass every rule.
pub fn is_elevated(role: &Role) -> bool {
    matches!(role, Role::Admin | Role::SuperAdmin)
}

/// A role set that must be satisfied, on top of capability, at a workflow stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleGate {
    /// reviewer, approver, admin, super_admin
    Review,
    /// approver, admin, super_admin
    Publish,
}

impl RoleGate {
    pub fn admits(&self, role: &Role) -> bool {
        match self {
            RoleGate::Review => matches!(
                role,
                Role::Reviewer | Role::Approver | Role::Admin | Role::SuperAdmin
            ),
            RoleGate::Publish => matches!(role, Role::Approver | Role::Admin | Role::SuperAdmin),
        }
    }

    pub fn members(&self) -> Vec<Role> {
        match self {
            RoleGate::Review => vec![Role::Reviewer, Role::Approver, Role::Admin, Role::SuperAdmin],
            RoleGate::Publish => vec![Role::Approver, Role::Admin, Role::SuperAdmin],
        }
    }

    /// Lowest admitted role, as used in denial messages
    pub fn minimum_label(&self) -> &'static str {
        match self {
            RoleGate::Review => "Reviewer",
            RoleGate::Publish => "Approver",
        }
    }
}
