//! Capability checks
//!
//! A capability is an externally resolved fact: "this actor may perform
//! `action` on `resource`". The engine never looks capabilities up from
//! ambient state; a [`CapabilityCheck`] is always handed in explicitly.

use content_types::Actor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Generic CRUD action a capability grants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityAction {
    Create,
    Read,
    Update,
    Delete,
}

impl CapabilityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityAction::Create => "create",
            CapabilityAction::Read => "read",
            CapabilityAction::Update => "update",
            CapabilityAction::Delete => "delete",
        }
    }
}

impl fmt::Display for CapabilityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from capability configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("Unknown capability action: {0}")]
    UnknownAction(String),
}

impl FromStr for CapabilityAction {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(CapabilityAction::Create),
            "read" => Ok(CapabilityAction::Read),
            "update" => Ok(CapabilityAction::Update),
            "delete" => Ok(CapabilityAction::Delete),
            other => Err(CapabilityError::UnknownAction(other.to_string())),
        }
    }
}

/// Source of capability facts, owned by an external permission store
pub trait CapabilityCheck: Send + Sync {
    fn has_capability(&self, actor: &Actor, resource: &str, action: CapabilityAction) -> bool;
}

impl<F> CapabilityCheck for F
where
    F: Fn(&Actor, &str, CapabilityAction) -> bool + Send + Sync,
{
    fn has_capability(&self, actor: &Actor, resource: &str, action: CapabilityAction) -> bool {
        self(actor, resource, action)
    }
}

/// Grants nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapabilities;

impl CapabilityCheck for NoCapabilities {
    fn has_capability(&self, _actor: &Actor, _resource: &str, _action: CapabilityAction) -> bool {
        false
    }
}

/// Wildcard resource key in a [`StaticCapabilities`] table
pub const ANY_RESOURCE: &str = "*";

/// In-memory capability table: role → resource → actions.
///
/// Role keys match case-insensitively. A `*` resource grants the listed
/// actions on every resource.
///
/// ```yaml
/// reviewer:
///   pages: [read, update]
///   sections: [create, update]
/// editor:
///   "*": [read]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCapabilities {
    grants: HashMap<String, HashMap<String, BTreeSet<CapabilityAction>>>,
}

impl StaticCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `actions` on `resource` to `role`
    pub fn grant(
        mut self,
        role: impl AsRef<str>,
        resource: impl Into<String>,
        actions: impl IntoIterator<Item = CapabilityAction>,
    ) -> Self {
        self.grants
            .entry(role.as_ref().trim().to_ascii_lowercase())
            .or_default()
            .entry(resource.into())
            .or_default()
            .extend(actions);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl CapabilityCheck for StaticCapabilities {
    fn has_capability(&self, actor: &Actor, resource: &str, action: CapabilityAction) -> bool {
        let role = actor.role.as_str();
        self.grants
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(role))
            .any(|(_, resources)| {
                [resources.get(resource), resources.get(ANY_RESOURCE)]
                    .into_iter()
                    .flatten()
                    .any(|actions| actions.contains(&action))
            })
    }
}
