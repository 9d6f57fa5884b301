//! Workflow-aware access evaluation
//!
//! Decides whether an actor may edit, delete, create children under, or
//! reorder a content item, from the item's workflow status and resource
//! type, the actor's role, the capabilities an external permission store
//! grants, and whether the actor created the item.
//!
//! # Architecture
//!
//! - [`registry`]: resource type → permission resource name
//! - [`hierarchy`]: elevated roles and the review/publish role gates
//! - [`capability`]: the [`CapabilityCheck`] seam to the permission store
//! - [`AccessEvaluator`]: the four decisions
//!
//! # Example
//!
//! ```rust
//! use content_access::{AccessEvaluator, CapabilityAction, StaticCapabilities};
//! use content_types::{Actor, EvaluationSubject, Role, WorkflowStatus};
//!
//! let capabilities =
//!     StaticCapabilities::new().grant("reviewer", "pages", [CapabilityAction::Update]);
//! let evaluator = AccessEvaluator::new(capabilities);
//!
//! let page = EvaluationSubject::new(WorkflowStatus::InReview, "page").with_created_by("u-1");
//!
//! assert!(evaluator.evaluate_edit(&page, &Actor::new("u-2", Role::Reviewer)).is_allowed());
//! assert!(evaluator.evaluate_edit(&page, &Actor::new("u-1", Role::Viewer)).is_denied());
//! ```

#![deny(unsafe_code)]

pub mod capability;
pub mod evaluator;
pub mod hierarchy;
pub mod registry;

pub use capability::{
    CapabilityAction, CapabilityCheck, CapabilityError, NoCapabilities, StaticCapabilities,
    ANY_RESOURCE,
};
pub use evaluator::{AccessEvaluator, DEFAULT_CHILD_RESOURCE};
pub use hierarchy::{is_elevated, RoleGate};
pub use registry::{is_known_resource_type, known_resource_types, resource_name};
