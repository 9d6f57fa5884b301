//! Content governor service
//!
//! The governor is the single entry point a host calls before mutating
//! content: it validates the subject, asks the [`AccessEvaluator`] for a
//! decision, and for moves also runs the [`TreeReorderPlanner`].

use crate::config::GovernorConfig;
use crate::error::{GovernorError, GovernorResult};
use content_access::{AccessEvaluator, CapabilityCheck};
use content_tree::{ReorderPlan, TreeReorderPlanner};
use content_types::{
    AccessSummary, Actor, Decision, DropPosition, EvaluationSubject, ResourceId, TreeNode,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// A governed operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Edit,
    Delete,
    CreateChild,
    Reorder,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Edit => "edit",
            Operation::Delete => "delete",
            Operation::CreateChild => "create_child",
            Operation::Reorder => "reorder",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Governs edits, deletions, child creation and reordering of content
#[derive(Debug)]
pub struct ContentGovernor {
    evaluator: AccessEvaluator,
    planner: TreeReorderPlanner,
    strict_status: bool,
    emit_decisions: bool,
}

impl ContentGovernor {
    /// Create a governor with default settings
    pub fn new(evaluator: AccessEvaluator) -> Self {
        Self {
            evaluator,
            planner: TreeReorderPlanner::new(),
            strict_status: false,
            emit_decisions: true,
        }
    }

    /// Create a governor builder
    pub fn builder() -> ContentGovernorBuilder {
        ContentGovernorBuilder::default()
    }

    /// Build a governor from configuration, using its static capability table
    pub fn from_config(config: &GovernorConfig) -> Self {
        Self::builder()
            .capabilities(config.capabilities.clone())
            .config(config)
            .build()
    }

    /// Load configuration and build a governor from it
    pub fn load(path: Option<&str>) -> GovernorResult<Self> {
        let config = GovernorConfig::load(path)?;
        Ok(Self::from_config(&config))
    }

    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    pub fn is_strict(&self) -> bool {
        self.strict_status
    }

    /// All four decisions for `subject`
    pub fn summarize(
        &self,
        subject: &EvaluationSubject,
        actor: &Actor,
    ) -> GovernorResult<AccessSummary> {
        subject.validate(self.strict_status)?;
        Ok(self.evaluator.evaluate_all(subject, actor))
    }

    pub fn authorize_edit(&self, subject: &EvaluationSubject, actor: &Actor) -> GovernorResult<()> {
        self.authorize(Operation::Edit, subject, actor)
    }

    pub fn authorize_delete(
        &self,
        subject: &EvaluationSubject,
        actor: &Actor,
    ) -> GovernorResult<()> {
        self.authorize(Operation::Delete, subject, actor)
    }

    /// `parent` is the item the new child would be created under
    pub fn authorize_create_child(
        &self,
        parent: &EvaluationSubject,
        actor: &Actor,
    ) -> GovernorResult<()> {
        self.authorize(Operation::CreateChild, parent, actor)
    }

    /// Authorize and plan a drag-and-drop move.
    ///
    /// `subject` describes the dragged node. The permission decision is
    /// checked first; a denied actor never learns whether the move itself
    /// would have been legal.
    pub fn authorize_reorder(
        &self,
        subject: &EvaluationSubject,
        actor: &Actor,
        roots: &[TreeNode],
        dragged: &ResourceId,
        target: &ResourceId,
        position: DropPosition,
    ) -> GovernorResult<ReorderPlan> {
        self.authorize(Operation::Reorder, subject, actor)?;

        self.planner
            .plan(roots, dragged, target, position)
            .map_err(|rejection| {
                if self.emit_decisions {
                    warn!(
                        dragged = %dragged,
                        target = %target,
                        position = %position,
                        rule = rejection.rule(),
                        "Reorder structurally rejected"
                    );
                }
                GovernorError::from(rejection)
            })
    }

    fn authorize(
        &self,
        operation: Operation,
        subject: &EvaluationSubject,
        actor: &Actor,
    ) -> GovernorResult<()> {
        subject.validate(self.strict_status)?;

        let decision = match operation {
            Operation::Edit => self.evaluator.evaluate_edit(subject, actor),
            Operation::Delete => self.evaluator.evaluate_delete(subject, actor),
            Operation::CreateChild => self.evaluator.evaluate_create_child(subject, actor),
            Operation::Reorder => self.evaluator.evaluate_reorder(subject, actor),
        };

        if self.emit_decisions {
            self.log_decision(operation, subject, actor, &decision);
        }

        match decision.reason() {
            None => Ok(()),
            Some(reason) => Err(GovernorError::Denied {
                operation: operation.to_string(),
                reason: reason.to_string(),
            }),
        }
    }

    fn log_decision(
        &self,
        operation: Operation,
        subject: &EvaluationSubject,
        actor: &Actor,
        decision: &Decision,
    ) {
        let actor_id = actor.id.as_ref().map(ResourceId::as_str).unwrap_or("-");
        match decision.reason() {
            None => {
                info!(
                    operation = %operation,
                    resource_type = %subject.resource_type,
                    status = %subject.status,
                    actor = actor_id,
                    role = %actor.role,
                    "Content operation allowed"
                );
            }
            Some(reason) => {
                warn!(
                    operation = %operation,
                    resource_type = %subject.resource_type,
                    status = %subject.status,
                    actor = actor_id,
                    role = %actor.role,
                    reason = %reason,
                    "Content operation denied"
                );
            }
        }
    }
}

/// Builder for [`ContentGovernor`]
#[derive(Default)]
pub struct ContentGovernorBuilder {
    capabilities: Option<Arc<dyn CapabilityCheck>>,
    child_resource: Option<String>,
    strict_status: bool,
    quiet: bool,
}

impl ContentGovernorBuilder {
    /// Capability source consulted for non-elevated roles
    pub fn capabilities(mut self, capabilities: impl CapabilityCheck + 'static) -> Self {
        self.capabilities = Some(Arc::new(capabilities));
        self
    }

    pub fn shared_capabilities(mut self, capabilities: Arc<dyn CapabilityCheck>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn child_resource(mut self, resource: impl Into<String>) -> Self {
        self.child_resource = Some(resource.into());
        self
    }

    pub fn strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    pub fn emit_decisions(mut self, emit: bool) -> Self {
        self.quiet = !emit;
        self
    }

    /// Apply the status, access and logging sections of `config`
    pub fn config(self, config: &GovernorConfig) -> Self {
        self.strict_status(config.status.strict)
            .child_resource(config.access.child_resource.clone())
            .emit_decisions(config.logging.emit_decisions)
    }

    /// Build the governor. Without a capability source only elevated roles
    /// and creators are ever allowed.
    pub fn build(self) -> ContentGovernor {
        let mut evaluator = match self.capabilities {
            Some(capabilities) => AccessEvaluator::from_shared(capabilities),
            None => AccessEvaluator::new(content_access::NoCapabilities),
        };
        if let Some(resource) = self.child_resource {
            evaluator = evaluator.with_child_resource(resource);
        }

        ContentGovernor {
            evaluator,
            planner: TreeReorderPlanner::new(),
            strict_status: self.strict_status,
            emit_decisions: !self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_access::{CapabilityAction, StaticCapabilities};
    use content_tree::StructuralRejection;
    use content_types::{ContentError, Role, WorkflowStatus};

    fn governor() -> ContentGovernor {
        ContentGovernor::builder()
            .capabilities(
                StaticCapabilities::new()
                    .grant("reviewer", "pages", [CapabilityAction::Update])
                    .grant("approver", "sections", [CapabilityAction::Create]),
            )
            .build()
    }

    fn forest() -> Vec<TreeNode> {
        vec![
            TreeNode::root("p1", 0)
                .with_child(TreeNode::child("s1", "p1", 1, 0))
                .with_child(TreeNode::child("s2", "p1", 1, 1)),
            TreeNode::root("p2", 1),
        ]
    }

    #[test]
    fn test_creator_may_edit_draft() {
        let subject = EvaluationSubject::new(WorkflowStatus::Draft, "page").with_created_by("u1");
        let actor = Actor::new("u1", Role::Viewer);

        assert!(governor().authorize_edit(&subject, &actor).is_ok());
    }

    #[test]
    fn test_denial_carries_reason() {
        let subject = EvaluationSubject::new(WorkflowStatus::Published, "page");
        let actor = Actor::new("u2", Role::Viewer);

        let err = governor().authorize_delete(&subject, &actor).unwrap_err();

        assert!(err.is_denial());
        assert_eq!(
            err,
            GovernorError::Denied {
                operation: "delete".to_string(),
                reason: "You do not have permission to delete pages, or you are not the creator."
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_create_child_uses_configured_resource() {
        let subject = EvaluationSubject::new(WorkflowStatus::PendingApproval, "page");
        let actor = Actor::new("u3", Role::Approver);

        assert!(governor().authorize_create_child(&subject, &actor).is_ok());

        let blocks = ContentGovernor::builder()
            .capabilities(
                StaticCapabilities::new().grant("approver", "sections", [CapabilityAction::Create]),
            )
            .child_resource("blocks")
            .build();
        assert!(blocks.authorize_create_child(&subject, &actor).is_err());
    }

    #[test]
    fn test_strict_mode_rejects_unknown_status() {
        let subject = EvaluationSubject::new(WorkflowStatus::parse("retired"), "page");
        let actor = Actor::new("u1", Role::Admin);

        assert!(governor().authorize_edit(&subject, &actor).is_ok());

        let strict = ContentGovernor::builder().strict_status(true).build();
        assert_eq!(
            strict.authorize_edit(&subject, &actor),
            Err(GovernorError::Invalid(ContentError::UnknownStatus(
                "retired".to_string()
            )))
        );
    }

    #[test]
    fn test_summarize_returns_all_four() {
        let subject = EvaluationSubject::new(WorkflowStatus::InReview, "page");
        let summary = governor()
            .summarize(&subject, &Actor::new("u2", Role::Reviewer))
            .unwrap();

        assert!(summary.can_edit.is_allowed());
        assert!(summary.can_delete.is_denied());
    }

    #[test]
    fn test_reorder_requires_permission_then_structure() {
        let roots = forest();
        let subject = EvaluationSubject::new(WorkflowStatus::Draft, "section").with_created_by("u1");
        let creator = Actor::new("u1", Role::Viewer);
        let stranger = Actor::new("u9", Role::Viewer);
        let gov = governor();

        let plan = gov
            .authorize_reorder(
                &subject,
                &creator,
                &roots,
                &"s2".into(),
                &"s1".into(),
                DropPosition::Before,
            )
            .unwrap();
        assert_eq!(plan.new_order_of(&"s2".into()), Some(0));

        let denied = gov.authorize_reorder(
            &subject,
            &stranger,
            &roots,
            &"s2".into(),
            &"p2".into(),
            DropPosition::Before,
        );
        assert!(denied.unwrap_err().is_denial());

        let rejected = gov.authorize_reorder(
            &subject,
            &creator,
            &roots,
            &"s2".into(),
            &"p2".into(),
            DropPosition::Before,
        );
        assert!(matches!(
            rejected,
            Err(GovernorError::Structural(
                StructuralRejection::ReparentViolation { .. }
            ))
        ));
    }

    #[test]
    fn test_from_config() {
        let mut config = GovernorConfig::default();
        config.status.strict = true;
        config.access.child_resource = "blocks".to_string();

        let gov = ContentGovernor::from_config(&config);

        assert!(gov.is_strict());
        assert_eq!(gov.evaluator().child_resource(), "blocks");
    }
}
