//! Structural rejections for tree moves

use content_types::{DropPosition, ResourceId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a drag-and-drop move is structurally illegal.
///
/// A rejection is an expected outcome shown to the user, not a system
/// failure. Nothing is mutated when a move is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StructuralRejection {
    /// A node was dropped onto itself
    #[error("Node {id} cannot be dropped onto itself")]
    SelfDrop { id: ResourceId },

    /// A root node left the root level, or something else joined it
    #[error("Root node {dragged} can only be placed before or after another root node (target {target}, position {position})")]
    RootIsolationViolation {
        dragged: ResourceId,
        target: ResourceId,
        position: DropPosition,
    },

    /// A child node would change parent
    #[error("Node {dragged} can only be reordered among siblings with the same parent (target {target}, position {position})")]
    ReparentViolation {
        dragged: ResourceId,
        target: ResourceId,
        position: DropPosition,
    },

    /// The dragged node or drop target is not in the snapshot
    #[error("Node {id} not found in tree snapshot")]
    NodeNotFound { id: ResourceId },

    /// The snapshot contains the same id twice
    #[error("Node {id} appears more than once in tree snapshot")]
    DuplicateNode { id: ResourceId },
}

impl StructuralRejection {
    /// Stable name of the violated rule
    pub fn rule(&self) -> &'static str {
        match self {
            StructuralRejection::SelfDrop { .. } => "self-drop",
            StructuralRejection::RootIsolationViolation { .. } => "root-isolation-violation",
            StructuralRejection::ReparentViolation { .. } => "reparent-violation",
            StructuralRejection::NodeNotFound { .. } => "node-not-found",
            StructuralRejection::DuplicateNode { .. } => "duplicate-node",
        }
    }
}

/// Result type for tree planning
pub type TreeResult<T> = std::result::Result<T, StructuralRejection>;
