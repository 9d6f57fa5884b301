//! Content tree reordering
//!
//! Validates drag-and-drop moves over a snapshot of the content forest and
//! computes the new sibling orders that realize them.
//!
//! # Example
//!
//! ```rust
//! use content_tree::{plan_reorder, StructuralRejection};
//! use content_types::{DropPosition, TreeNode};
//!
//! let forest = vec![
//!     TreeNode::root("home", 0).with_child(TreeNode::child("intro", "home", 1, 0)),
//!     TreeNode::root("about", 1),
//! ];
//!
//! let plan = plan_reorder(&forest, &"home".into(), &"about".into(), DropPosition::After).unwrap();
//! assert_eq!(plan.new_order_of(&"about".into()), Some(0));
//! assert_eq!(plan.new_order_of(&"home".into()), Some(1));
//!
//! let rejected = plan_reorder(&forest, &"home".into(), &"intro".into(), DropPosition::Inside);
//! assert!(matches!(
//!     rejected,
//!     Err(StructuralRejection::RootIsolationViolation { .. })
//! ));
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod forest;
pub mod planner;

pub use error::{StructuralRejection, TreeResult};
pub use forest::{Forest, ForestIssue, Placement};
pub use planner::{plan_reorder, OrderAssignment, ReorderPlan, TreeReorderPlanner};
