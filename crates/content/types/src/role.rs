//! Actor roles
//!
//! Roles arrive either as a bare identifier (`"Reviewer"`) or as an object
//! carrying one (`{"slug": "reviewer", "name": "Reviewer"}`). [`RoleRepr`]
//! captures both shapes and `Role::from(RoleRepr)` is the single place
//! where they are normalized. Only the identifier is load-bearing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized actor role
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RoleRepr", into = "String")]
pub enum Role {
    /// Anyone without an elevated role
    #[default]
    Viewer,
    Reviewer,
    Approver,
    Admin,
    SuperAdmin,
    /// Any other identifier; treated as viewer-class by every gate
    Other(String),
}

impl Role {
    /// Parse a role identifier, case-insensitively
    pub fn parse(identifier: &str) -> Self {
        let normalized = identifier.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "viewer" => Role::Viewer,
            "reviewer" => Role::Reviewer,
            "approver" => Role::Approver,
            "admin" => Role::Admin,
            "super_admin" => Role::SuperAdmin,
            _ => Role::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Viewer => "viewer",
            Role::Reviewer => "reviewer",
            Role::Approver => "approver",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::Other(s) => s,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl From<&str> for Role {
    fn from(identifier: &str) -> Self {
        Role::parse(identifier)
    }
}

/// Role as it appears on the wire
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RoleRepr {
    /// `"reviewer"`
    Identifier(String),
    /// `{"slug": "reviewer"}`; `id` and then `name` are used when `slug` is absent
    Object {
        #[serde(default)]
        slug: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<RoleRepr> for Role {
    fn from(repr: RoleRepr) -> Self {
        match repr {
            RoleRepr::Identifier(identifier) => Role::parse(&identifier),
            RoleRepr::Object { slug, id, name } => {
                Role::parse(slug.or(id).or(name).as_deref().unwrap_or_default())
            }
        }
    }
}
