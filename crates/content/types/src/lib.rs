//! Content workflow domain types
//!
//! Shared vocabulary for the content workflow engine: workflow statuses,
//! actor roles, evaluation subjects, permission decisions and the tree
//! nodes used when reordering content.
//!
//! Every value here is a snapshot supplied by the caller for a single
//! evaluation. Nothing in this crate owns persistent state.
//!
//! # Example
//!
//! ```rust
//! use content_types::{Actor, EvaluationSubject, Role, WorkflowStatus};
//!
//! let subject = EvaluationSubject::new(WorkflowStatus::Draft, "page").with_created_by("u-1");
//! let actor = Actor::new("u-1", Role::parse("Viewer"));
//!
//! assert!(subject.is_created_by(&actor));
//! assert!(subject.status.is_editable());
//! ```

#![deny(unsafe_code)]

pub mod decision;
pub mod error;
pub mod ids;
pub mod role;
pub mod status;
pub mod subject;
pub mod tree;

pub use decision::{AccessSummary, Decision};
pub use error::{ContentError, ContentResult};
pub use ids::ResourceId;
pub use role::{Role, RoleRepr};
pub use status::WorkflowStatus;
pub use subject::{Actor, EvaluationSubject};
pub use tree::{DropPosition, TreeNode};
