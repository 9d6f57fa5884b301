//! Permission decisions

use serde::Serialize;

/// Outcome of a permission question.
///
/// `reason` is present exactly when the action is denied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Decision {
    allowed: bool,
    reason: Option<String>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Human-readable denial reason, `None` when allowed
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Convert into a `Result`, carrying the denial reason as the error
    pub fn into_result(self) -> Result<(), String> {
        match self.reason {
            None => Ok(()),
            Some(reason) => Err(reason),
        }
    }
}

/// All four decisions for one subject and actor
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSummary {
    pub can_edit: Decision,
    pub can_delete: Decision,
    pub can_create_child: Decision,
    pub can_reorder: Decision,
}

impl AccessSummary {
    /// A summary where every question is allowed
    pub fn all_allowed() -> Self {
        Self {
            can_edit: Decision::allow(),
            can_delete: Decision::allow(),
            can_create_child: Decision::allow(),
            can_reorder: Decision::allow(),
        }
    }

    /// Decisions paired with their question names, in a fixed order
    pub fn entries(&self) -> [(&'static str, &Decision); 4] {
        [
            ("edit", &self.can_edit),
            ("delete", &self.can_delete),
            ("create_child", &self.can_create_child),
            ("reorder", &self.can_reorder),
        ]
    }
}
