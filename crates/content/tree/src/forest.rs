//! Flattened, indexed view over a caller-supplied content forest

use crate::error::{StructuralRejection, TreeResult};
use content_types::{ResourceId, TreeNode};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// A node together with where it actually sits in the snapshot
#[derive(Clone, Copy, Debug)]
pub struct Placement<'a> {
    pub node: &'a TreeNode,
    /// Id of the node whose `children` hold this one; `None` for top-level entries
    pub container: Option<&'a ResourceId>,
    /// Nesting depth in the snapshot
    pub depth: u32,
    /// Pre-order position, used to break ties between equal `order` values
    pub sequence: usize,
}

/// Read-only index over a forest snapshot
#[derive(Debug)]
pub struct Forest<'a> {
    placements: Vec<Placement<'a>>,
    index: HashMap<&'a ResourceId, usize>,
}

impl<'a> Forest<'a> {
    /// Index `roots` and all their descendants.
    ///
    /// Fails when an id occurs more than once.
    pub fn new(roots: &'a [TreeNode]) -> TreeResult<Self> {
        let mut forest = Forest {
            placements: Vec::new(),
            index: HashMap::new(),
        };
        let mut stack: Vec<(&'a TreeNode, Option<&'a ResourceId>, u32)> =
            roots.iter().rev().map(|node| (node, None, 0)).collect();

        while let Some((node, container, depth)) = stack.pop() {
            let sequence = forest.placements.len();
            if forest.index.insert(&node.id, sequence).is_some() {
                return Err(StructuralRejection::DuplicateNode {
                    id: node.id.clone(),
                });
            }
            forest.placements.push(Placement {
                node,
                container,
                depth,
                sequence,
            });
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|child| (child, Some(&node.id), depth + 1)),
            );
        }

        Ok(forest)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&'a TreeNode> {
        self.placement(id).map(|p| p.node)
    }

    pub fn placement(&self, id: &ResourceId) -> Option<Placement<'a>> {
        self.index.get(id).map(|&i| self.placements[i])
    }

    /// Nodes in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &'a TreeNode> + '_ {
        self.placements.iter().map(|p| p.node)
    }

    /// The sibling group of `node`, in current order.
    ///
    /// For a root this is every root; otherwise every non-root node whose
    /// `parent_id` matches. Equal `order` values keep snapshot order.
    pub fn sibling_group(&self, node: &TreeNode) -> Vec<&'a TreeNode> {
        let mut group: Vec<&Placement<'a>> = if node.is_root() {
            self.placements.iter().filter(|p| p.node.is_root()).collect()
        } else {
            self.placements
                .iter()
                .filter(|p| !p.node.is_root() && shares_parent(p.node, node))
                .collect()
        };
        group.sort_by_key(|p| (p.node.order, p.sequence));
        group.into_iter().map(|p| p.node).collect()
    }

    /// Check the snapshot against the tree invariants.
    ///
    /// An empty result means the snapshot is consistent. Planning does not
    /// require a clean snapshot; these are diagnostics for callers.
    pub fn validate(&self) -> Vec<ForestIssue> {
        let mut issues = Vec::new();

        for placement in &self.placements {
            let node = placement.node;
            if (node.level == 0) != node.parent_id.is_none() {
                issues.push(ForestIssue::RootMismatch {
                    id: node.id.clone(),
                    level: node.level,
                    parent_id: node.parent_id.clone(),
                });
            }
            if node.level != placement.depth {
                issues.push(ForestIssue::LevelMismatch {
                    id: node.id.clone(),
                    level: node.level,
                    depth: placement.depth,
                });
            }
            if let (Some(declared), Some(container)) = (&node.parent_id, placement.container) {
                if !declared.same_as(container) {
                    issues.push(ForestIssue::ParentMismatch {
                        id: node.id.clone(),
                        declared: declared.clone(),
                        container: container.clone(),
                    });
                }
            }
        }

        let mut groups: HashMap<Option<&ResourceId>, Vec<u32>> = HashMap::new();
        for placement in &self.placements {
            let key = if placement.node.is_root() {
                None
            } else {
                placement.node.parent_id.as_ref()
            };
            groups.entry(key).or_default().push(placement.node.order);
        }
        let mut gaps: Vec<ForestIssue> = groups
            .into_iter()
            .filter_map(|(parent, mut orders)| {
                orders.sort_unstable();
                let contiguous = orders.iter().enumerate().all(|(i, &o)| o as usize == i);
                (!contiguous).then(|| ForestIssue::OrderGap {
                    parent_id: parent.cloned(),
                    orders,
                })
            })
            .collect();
        gaps.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
        issues.extend(gaps);

        issues
    }
}

/// String-normalized parent comparison
fn shares_parent(a: &TreeNode, b: &TreeNode) -> bool {
    match (&a.parent_id, &b.parent_id) {
        (Some(x), Some(y)) => x.same_as(y),
        _ => false,
    }
}

/// An inconsistency found in a forest snapshot
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ForestIssue {
    /// `level == 0` and "has no parent" disagree
    #[error("Node {id} has level {level} but parent {parent_id:?}")]
    RootMismatch {
        id: ResourceId,
        level: u32,
        parent_id: Option<ResourceId>,
    },

    #[error("Node {id} declares level {level} but is nested at depth {depth}")]
    LevelMismatch { id: ResourceId, level: u32, depth: u32 },

    #[error("Node {id} declares parent {declared} but is nested under {container}")]
    ParentMismatch {
        id: ResourceId,
        declared: ResourceId,
        container: ResourceId,
    },

    /// Sibling orders are not a permutation of `0..n`
    #[error("Siblings under {parent_id:?} have non-contiguous orders {orders:?}")]
    OrderGap {
        parent_id: Option<ResourceId>,
        orders: Vec<u32>,
    },
}
