//! Workflow statuses of a publishing pipeline

use crate::error::{ContentError, ContentResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a content item
///
/// The status set is closed, but callers that bypass the UI can still
/// hand over arbitrary strings. Those are carried as [`WorkflowStatus::Other`]
/// so that evaluation stays total; strict callers reject them up front
/// with [`WorkflowStatus::parse_strict`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkflowStatus {
    Draft,
    InReview,
    ChangesRequested,
    PendingApproval,
    PendingPublish,
    Published,
    Archived,
    /// Unrecognized status string
    Other(String),
}

impl WorkflowStatus {
    /// All statuses of the closed set, in pipeline order
    pub const KNOWN: [WorkflowStatus; 7] = [
        WorkflowStatus::Draft,
        WorkflowStatus::InReview,
        WorkflowStatus::ChangesRequested,
        WorkflowStatus::PendingApproval,
        WorkflowStatus::PendingPublish,
        WorkflowStatus::Published,
        WorkflowStatus::Archived,
    ];

    /// Parse a status, keeping unrecognized values as [`WorkflowStatus::Other`]
    pub fn parse(value: &str) -> Self {
        match value {
            "draft" => WorkflowStatus::Draft,
            "in_review" => WorkflowStatus::InReview,
            "changes_requested" => WorkflowStatus::ChangesRequested,
            "pending_approval" => WorkflowStatus::PendingApproval,
            "pending_publish" => WorkflowStatus::PendingPublish,
            "published" => WorkflowStatus::Published,
            "archived" => WorkflowStatus::Archived,
            other => WorkflowStatus::Other(other.to_string()),
        }
    }

    /// Parse a status, rejecting anything outside the closed set
    pub fn parse_strict(value: &str) -> ContentResult<Self> {
        match Self::parse(value) {
            WorkflowStatus::Other(other) => Err(ContentError::UnknownStatus(other)),
            status => Ok(status),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::InReview => "in_review",
            WorkflowStatus::ChangesRequested => "changes_requested",
            WorkflowStatus::PendingApproval => "pending_approval",
            WorkflowStatus::PendingPublish => "pending_publish",
            WorkflowStatus::Published => "published",
            WorkflowStatus::Archived => "archived",
            WorkflowStatus::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, WorkflowStatus::Other(_))
    }

    /// Author-owned stages: `draft` and `changes_requested`
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::Draft | WorkflowStatus::ChangesRequested
        )
    }

    /// Stages guarded by the review gate: `in_review` and `pending_approval`
    pub fn is_under_review(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::InReview | WorkflowStatus::PendingApproval
        )
    }

    /// Terminal stages: `published` and `archived`
    pub fn is_settled(&self) -> bool {
        matches!(self, WorkflowStatus::Published | WorkflowStatus::Archived)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for WorkflowStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for WorkflowStatus {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<WorkflowStatus> for String {
    fn from(status: WorkflowStatus) -> Self {
        status.as_str().to_string()
    }
}
