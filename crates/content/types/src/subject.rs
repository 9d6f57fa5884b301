//! Evaluation inputs: the acting user and the resource being acted on

use crate::error::{ContentError, ContentResult};
use crate::ids::ResourceId;
use crate::role::Role;
use crate::status::WorkflowStatus;
use serde::{Deserialize, Serialize};

/// The user performing an action
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<ResourceId>, role: Role) -> Self {
        Self {
            id: Some(id.into()),
            role,
        }
    }

    /// An actor with no identity; never counts as a creator
    pub fn anonymous(role: Role) -> Self {
        Self { id: None, role }
    }
}

/// The resource an action is evaluated against
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSubject {
    pub status: WorkflowStatus,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ResourceId>,
}

impl EvaluationSubject {
    pub fn new(status: WorkflowStatus, resource_type: impl Into<String>) -> Self {
        Self {
            status,
            resource_type: resource_type.into(),
            created_by: None,
        }
    }

    pub fn with_created_by(mut self, creator: impl Into<ResourceId>) -> Self {
        self.created_by = Some(creator.into());
        self
    }

    /// Check the subject before evaluation.
    ///
    /// In strict mode a status outside the closed set is rejected here
    /// instead of surfacing later as a soft denial.
    pub fn validate(&self, strict_status: bool) -> ContentResult<()> {
        if self.resource_type.trim().is_empty() {
            return Err(ContentError::EmptyResourceType);
        }
        if strict_status && !self.status.is_known() {
            return Err(ContentError::UnknownStatus(self.status.to_string()));
        }
        Ok(())
    }

    /// Whether `actor` created this resource.
    ///
    /// Both ids must be present and non-blank; they are compared by their
    /// canonical string form.
    pub fn is_created_by(&self, actor: &Actor) -> bool {
        match (&actor.id, &self.created_by) {
            (Some(actor_id), Some(creator)) => actor_id.same_as(creator),
            _ => false,
        }
    }
}
