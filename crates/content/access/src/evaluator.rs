//! Access evaluator
//!
//! Answers four questions for a subject and an actor: may the actor edit
//! it, delete it, create a child under it, or reorder it. Each answer is a
//! [`Decision`]; denials are values, never errors.
//!
//! Elevated actors (`admin`, `super_admin`) are allowed before any other
//! rule runs. For everyone else the answer depends on the workflow status,
//! the capability the external permission store grants, the role gate of
//! the status, and whether the actor created the subject.

use crate::capability::{CapabilityAction, CapabilityCheck};
use crate::hierarchy::{is_elevated, RoleGate};
use crate::registry::resource_name;
use content_types::{AccessSummary, Actor, Decision, EvaluationSubject, WorkflowStatus};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resource name child creation is checked against unless configured otherwise
pub const DEFAULT_CHILD_RESOURCE: &str = "sections";

/// Evaluates workflow-aware permissions
#[derive(Clone)]
pub struct AccessEvaluator {
    capabilities: Arc<dyn CapabilityCheck>,
    child_resource: String,
}

impl fmt::Debug for AccessEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessEvaluator")
            .field("child_resource", &self.child_resource)
            .finish_non_exhaustive()
    }
}

impl AccessEvaluator {
    /// Create an evaluator backed by `capabilities`
    pub fn new(capabilities: impl CapabilityCheck + 'static) -> Self {
        Self::from_shared(Arc::new(capabilities))
    }

    pub fn from_shared(capabilities: Arc<dyn CapabilityCheck>) -> Self {
        Self {
            capabilities,
            child_resource: DEFAULT_CHILD_RESOURCE.to_string(),
        }
    }

    /// Set the resource name child creation is checked against
    pub fn with_child_resource(mut self, resource: impl Into<String>) -> Self {
        self.child_resource = resource.into();
        self
    }

    pub fn child_resource(&self) -> &str {
        &self.child_resource
    }

    /// Can `actor` edit `subject`?
    pub fn evaluate_edit(&self, subject: &EvaluationSubject, actor: &Actor) -> Decision {
        if is_elevated(&actor.role) {
            return Decision::allow();
        }

        let resource_type = &subject.resource_type;
        let can_update = self.has(actor, subject, CapabilityAction::Update);
        let status = &subject.status;

        let decision = match status {
            s if s.is_editable() => {
                if can_update || subject.is_created_by(actor) {
                    Decision::allow()
                } else {
                    Decision::deny(format!(
                        "You do not have permission to edit {}s, or you are not the creator.",
                        resource_type
                    ))
                }
            }
            WorkflowStatus::InReview | WorkflowStatus::PendingApproval => {
                gated_edit(RoleGate::Review, can_update, subject, actor)
            }
            WorkflowStatus::PendingPublish => {
                gated_edit(RoleGate::Publish, can_update, subject, actor)
            }
            s if s.is_settled() => {
                if can_update {
                    Decision::allow()
                } else {
                    Decision::deny(format!(
                        "You do not have permission to edit {}s.",
                        resource_type
                    ))
                }
            }
            _ => unknown_status(subject, actor, "edit"),
        };

        trace_decision("edit", subject, actor, &decision);
        decision
    }

    /// Can `actor` delete `subject`?
    ///
    /// The delete capability suffices at every status. Creators without it
    /// may only delete outside the approval pipeline.
    pub fn evaluate_delete(&self, subject: &EvaluationSubject, actor: &Actor) -> Decision {
        if is_elevated(&actor.role) {
            return Decision::allow();
        }

        let status = &subject.status;
        let decision = if self.has(actor, subject, CapabilityAction::Delete) {
            Decision::allow()
        } else if subject.is_created_by(actor) {
            if status.is_editable() || status.is_settled() {
                Decision::allow()
            } else {
                Decision::deny(format!(
                    "You do not have permission to delete {}s, and creators cannot delete content in {} status.",
                    subject.resource_type, status
                ))
            }
        } else {
            Decision::deny(format!(
                "You do not have permission to delete {}s, or you are not the creator.",
                subject.resource_type
            ))
        };

        trace_decision("delete", subject, actor, &decision);
        decision
    }

    /// Can `actor` create a child (a section) under `parent`?
    ///
    /// The create capability is checked against the child resource
    /// (`sections` by default), whatever the parent's own type.
    pub fn evaluate_create_child(&self, parent: &EvaluationSubject, actor: &Actor) -> Decision {
        if is_elevated(&actor.role) {
            return Decision::allow();
        }

        let child = &self.child_resource;
        let can_create = self
            .capabilities
            .has_capability(actor, child, CapabilityAction::Create);
        let status = &parent.status;

        let decision = if status.is_editable() {
            if can_create || parent.is_created_by(actor) {
                Decision::allow()
            } else {
                Decision::deny(format!(
                    "You do not have permission to create {}, or you are not the creator of this {}.",
                    child, parent.resource_type
                ))
            }
        } else if status.is_under_review() {
            if !can_create {
                Decision::deny(format!("You do not have permission to create {}.", child))
            } else if !RoleGate::Review.admits(&actor.role) {
                Decision::deny(format!(
                    "Only Reviewer or higher roles can create {} when {} is in {} status.",
                    child, parent.resource_type, status
                ))
            } else {
                Decision::allow()
            }
        } else {
            if !status.is_known() {
                warn!(
                    status = %status,
                    resource_type = %parent.resource_type,
                    "Create-child evaluated against unknown status"
                );
            }
            Decision::deny(format!(
                "Cannot create {} when {} is in {} status.",
                child, parent.resource_type, status
            ))
        };

        trace_decision("create_child", parent, actor, &decision);
        decision
    }

    /// Can `actor` reorder or move `subject` within its tree?
    ///
    /// This is the permission gate only; structural legality is decided by
    /// the tree planner.
    pub fn evaluate_reorder(&self, subject: &EvaluationSubject, actor: &Actor) -> Decision {
        if is_elevated(&actor.role) {
            return Decision::allow();
        }

        let resource_type = &subject.resource_type;
        let can_update = self.has(actor, subject, CapabilityAction::Update);
        let status = &subject.status;

        let decision = match status {
            WorkflowStatus::Draft => {
                if can_update || subject.is_created_by(actor) {
                    Decision::allow()
                } else {
                    Decision::deny(format!(
                        "You do not have permission to reorder {}s, or you are not the creator.",
                        resource_type
                    ))
                }
            }
            WorkflowStatus::InReview
            | WorkflowStatus::PendingApproval
            | WorkflowStatus::PendingPublish => {
                if !can_update {
                    Decision::deny(format!(
                        "You do not have permission to reorder {}s.",
                        resource_type
                    ))
                } else if !RoleGate::Review.admits(&actor.role) {
                    Decision::deny(format!(
                        "Only Reviewer or higher roles can reorder content in {} status.",
                        status
                    ))
                } else {
                    Decision::allow()
                }
            }
            WorkflowStatus::Other(_) => unknown_status(subject, actor, "reorder"),
            _ => Decision::deny(format!(
                "Cannot reorder {}s in {} status.",
                resource_type, status
            )),
        };

        trace_decision("reorder", subject, actor, &decision);
        decision
    }

    /// All four decisions at once
    pub fn evaluate_all(&self, subject: &EvaluationSubject, actor: &Actor) -> AccessSummary {
        if is_elevated(&actor.role) {
            return AccessSummary::all_allowed();
        }

        AccessSummary {
            can_edit: self.evaluate_edit(subject, actor),
            can_delete: self.evaluate_delete(subject, actor),
            can_create_child: self.evaluate_create_child(subject, actor),
            can_reorder: self.evaluate_reorder(subject, actor),
        }
    }

    fn has(&self, actor: &Actor, subject: &EvaluationSubject, action: CapabilityAction) -> bool {
        self.capabilities
            .has_capability(actor, &resource_name(&subject.resource_type), action)
    }
}

/// Edit in a pipeline status: capability first, then the status's role gate
fn gated_edit(
    gate: RoleGate,
    can_update: bool,
    subject: &EvaluationSubject,
    actor: &Actor,
) -> Decision {
    if !can_update {
        Decision::deny(format!(
            "You do not have permission to edit {}s.",
            subject.resource_type
        ))
    } else if !gate.admits(&actor.role) {
        Decision::deny(format!(
            "Only {} or higher roles can edit content in {} status.",
            gate.minimum_label(),
            subject.status
        ))
    } else {
        Decision::allow()
    }
}

fn unknown_status(subject: &EvaluationSubject, actor: &Actor, question: &str) -> Decision {
    warn!(
        question,
        status = %subject.status,
        resource_type = %subject.resource_type,
        actor_role = %actor.role,
        "Access evaluated against unknown status"
    );
    Decision::deny(format!("Unknown status: {}", subject.status))
}

fn trace_decision(question: &str, subject: &EvaluationSubject, actor: &Actor, decision: &Decision) {
    debug!(
        question,
        resource_type = %subject.resource_type,
        status = %subject.status,
        actor_role = %actor.role,
        allowed = decision.is_allowed(),
        reason = decision.reason().unwrap_or_default(),
        "Access evaluated"
    );
}
