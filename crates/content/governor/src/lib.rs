//! Content governor
//!
//! One configured entry point for hosts that mutate workflow content. The
//! governor validates the subject, evaluates the actor's permission, logs
//! the decision, and for drag-and-drop moves also plans the new sibling
//! orders.
//!
//! # Example
//!
//! ```rust
//! use content_governor::{ContentGovernor, GovernorError};
//! use content_types::{Actor, DropPosition, EvaluationSubject, Role, TreeNode, WorkflowStatus};
//!
//! let governor = ContentGovernor::builder().build();
//! let roots = vec![TreeNode::root("a", 0), TreeNode::root("b", 1)];
//! let page = EvaluationSubject::new(WorkflowStatus::Draft, "page").with_created_by("u-1");
//!
//! let plan = governor
//!     .authorize_reorder(
//!         &page,
//!         &Actor::new("u-1", Role::Viewer),
//!         &roots,
//!         &"b".into(),
//!         &"a".into(),
//!         DropPosition::Before,
//!     )
//!     .unwrap();
//! assert_eq!(plan.new_order_of(&"b".into()), Some(0));
//!
//! let err = governor
//!     .authorize_delete(&page, &Actor::new("u-2", Role::Viewer))
//!     .unwrap_err();
//! assert!(matches!(err, GovernorError::Denied { .. }));
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod governor;

pub use config::{AccessConfig, GovernorConfig, LoggingConfig, StatusConfig};
pub use error::{GovernorError, GovernorResult};
pub use governor::{ContentGovernor, ContentGovernorBuilder, Operation};
