//! Content tree snapshot nodes

use crate::ids::ResourceId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in a caller-supplied content forest
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: ResourceId,
    #[serde(default)]
    pub parent_id: Option<ResourceId>,
    /// Depth, 0 for roots
    #[serde(default)]
    pub level: u32,
    /// Position among siblings
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn root(id: impl Into<ResourceId>, order: u32) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            level: 0,
            order,
            children: Vec::new(),
        }
    }

    pub fn child(
        id: impl Into<ResourceId>,
        parent_id: impl Into<ResourceId>,
        level: u32,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent_id.into()),
            level,
            order,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// A node is a root when it sits at level 0 or has no parent.
    pub fn is_root(&self) -> bool {
        self.level == 0 || self.parent_id.is_none()
    }

    /// Number of nodes in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}

/// Where a dragged node lands relative to the drop target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

impl DropPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropPosition::Before => "before",
            DropPosition::After => "after",
            DropPosition::Inside => "inside",
        }
    }

    /// `before` and `after` reposition among siblings; `inside` nests.
    pub fn is_sibling(&self) -> bool {
        !matches!(self, DropPosition::Inside)
    }
}

impl fmt::Display for DropPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
