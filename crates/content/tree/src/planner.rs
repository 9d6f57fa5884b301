//! Reorder planning
//!
//! Turns a drag-and-drop gesture into new `order` values for one sibling
//! group. Two structural rules decide legality before any order is
//! computed:
//!
//! - **Root isolation**: a root may only be placed before or after another root.
//! - **No re-parenting**: a child may only be placed before or after a node
//!   with the same parent. Nesting (`inside`) is never a reorder.
//!
//! Dropping a node onto itself is always rejected.
//!
//! Planning is pure: the snapshot is borrowed, the plan is a new value, and
//! persisting it is the caller's separate step.

use crate::error::{StructuralRejection, TreeResult};
use crate::forest::Forest;
use content_types::{DropPosition, ResourceId, TreeNode};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// New order for one sibling
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAssignment {
    pub id: ResourceId,
    pub previous_order: u32,
    pub new_order: u32,
}

impl OrderAssignment {
    pub fn is_changed(&self) -> bool {
        self.previous_order != self.new_order
    }
}

/// The orders that realize a legal move, for every node of the sibling group
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPlan {
    /// Parent of the sibling group; `None` for the root group
    pub parent_id: Option<ResourceId>,
    pub dragged_id: ResourceId,
    pub target_id: ResourceId,
    pub position: DropPosition,
    pub from_index: usize,
    pub to_index: usize,
    /// One entry per sibling, in new order
    pub assignments: Vec<OrderAssignment>,
}

impl ReorderPlan {
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments whose order actually moves
    pub fn changed(&self) -> impl Iterator<Item = &OrderAssignment> {
        self.assignments.iter().filter(|a| a.is_changed())
    }

    pub fn is_noop(&self) -> bool {
        self.changed().next().is_none()
    }

    pub fn new_order_of(&self, id: &ResourceId) -> Option<u32> {
        self.assignments
            .iter()
            .find(|a| &a.id == id)
            .map(|a| a.new_order)
    }

    /// A copy of `roots` with the plan's orders written in and the affected
    /// sibling lists re-sorted. `roots` itself is untouched.
    pub fn apply(&self, roots: &[TreeNode]) -> Vec<TreeNode> {
        let orders: HashMap<&ResourceId, u32> = self
            .assignments
            .iter()
            .map(|a| (&a.id, a.new_order))
            .collect();
        let mut updated = roots.to_vec();
        write_orders(&mut updated, &orders);
        updated
    }
}

fn write_orders(nodes: &mut [TreeNode], orders: &HashMap<&ResourceId, u32>) {
    let mut touched = false;
    for node in nodes.iter_mut() {
        if let Some(&order) = orders.get(&node.id) {
            node.order = order;
            touched = true;
        }
        write_orders(&mut node.children, orders);
    }
    if touched {
        nodes.sort_by_key(|n| n.order);
    }
}

/// Validates moves and computes reorder plans
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeReorderPlanner;

impl TreeReorderPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Plan moving `dragged` to `position` relative to `target`
    pub fn plan(
        &self,
        roots: &[TreeNode],
        dragged: &ResourceId,
        target: &ResourceId,
        position: DropPosition,
    ) -> TreeResult<ReorderPlan> {
        let result = self.try_plan(roots, dragged, target, position);
        match &result {
            Ok(plan) => debug!(
                dragged = %dragged,
                target = %target,
                position = %position,
                from = plan.from_index,
                to = plan.to_index,
                siblings = plan.len(),
                "Reorder planned"
            ),
            Err(rejection) => debug!(
                dragged = %dragged,
                target = %target,
                position = %position,
                rule = rejection.rule(),
                "Reorder rejected"
            ),
        }
        result
    }

    /// Check structural legality only, without computing orders
    pub fn check(
        &self,
        roots: &[TreeNode],
        dragged: &ResourceId,
        target: &ResourceId,
        position: DropPosition,
    ) -> TreeResult<()> {
        if dragged == target {
            return Err(StructuralRejection::SelfDrop {
                id: dragged.clone(),
            });
        }
        let forest = Forest::new(roots)?;
        let (dragged_node, target_node) = locate(&forest, dragged, target)?;
        check_rules(dragged_node, target_node, position)
    }

    fn try_plan(
        &self,
        roots: &[TreeNode],
        dragged: &ResourceId,
        target: &ResourceId,
        position: DropPosition,
    ) -> TreeResult<ReorderPlan> {
        if dragged == target {
            return Err(StructuralRejection::SelfDrop {
                id: dragged.clone(),
            });
        }

        let forest = Forest::new(roots)?;
        let (dragged_node, target_node) = locate(&forest, dragged, target)?;
        check_rules(dragged_node, target_node, position)?;

        let mut group = forest.sibling_group(dragged_node);
        let from_index = index_in(&group, dragged)?;
        let to_index = index_in(&group, target)?;

        // Stable shift: the dragged node takes the target's slot and the
        // nodes in between close the gap it left.
        let moved = group.remove(from_index);
        group.insert(to_index, moved);

        let assignments = group
            .iter()
            .enumerate()
            .map(|(new_order, node)| OrderAssignment {
                id: node.id.clone(),
                previous_order: node.order,
                new_order: new_order as u32,
            })
            .collect();

        Ok(ReorderPlan {
            parent_id: if dragged_node.is_root() {
                None
            } else {
                dragged_node.parent_id.clone()
            },
            dragged_id: dragged.clone(),
            target_id: target.clone(),
            position,
            from_index,
            to_index,
            assignments,
        })
    }
}

/// Plan a reorder with the default planner
pub fn plan_reorder(
    roots: &[TreeNode],
    dragged: &ResourceId,
    target: &ResourceId,
    position: DropPosition,
) -> TreeResult<ReorderPlan> {
    TreeReorderPlanner::new().plan(roots, dragged, target, position)
}

fn locate<'a>(
    forest: &Forest<'a>,
    dragged: &ResourceId,
    target: &ResourceId,
) -> TreeResult<(&'a TreeNode, &'a TreeNode)> {
    let find = |id: &ResourceId| {
        forest
            .get(id)
            .ok_or_else(|| StructuralRejection::NodeNotFound { id: id.clone() })
    };
    Ok((find(dragged)?, find(target)?))
}

fn check_rules(dragged: &TreeNode, target: &TreeNode, position: DropPosition) -> TreeResult<()> {
    if dragged.is_root() {
        if !position.is_sibling() || !target.is_root() {
            return Err(StructuralRejection::RootIsolationViolation {
                dragged: dragged.id.clone(),
                target: target.id.clone(),
                position,
            });
        }
        return Ok(());
    }

    let same_parent = match (&dragged.parent_id, &target.parent_id) {
        (Some(a), Some(b)) => !target.is_root() && a.same_as(b),
        _ => false,
    };
    if !position.is_sibling() || !same_parent {
        return Err(StructuralRejection::ReparentViolation {
            dragged: dragged.id.clone(),
            target: target.id.clone(),
            position,
        });
    }
    Ok(())
}

fn index_in(group: &[&TreeNode], id: &ResourceId) -> TreeResult<usize> {
    group
        .iter()
        .position(|node| &node.id == id)
        .ok_or_else(|| StructuralRejection::NodeNotFound { id: id.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// r1 (c1, c2, c3), r2 (c4), r3
    fn forest() -> Vec<TreeNode> {
        vec![
            TreeNode::root("r1", 0)
                .with_child(TreeNode::child("c1", "r1", 1, 0))
                .with_child(TreeNode::child("c2", "r1", 1, 1))
                .with_child(TreeNode::child("c3", "r1", 1, 2)),
            TreeNode::root("r2", 1).with_child(TreeNode::child("c4", "r2", 1, 0)),
            TreeNode::root("r3", 2),
        ]
    }

    fn plan(dragged: &str, target: &str, position: DropPosition) -> TreeResult<ReorderPlan> {
        plan_reorder(&forest(), &dragged.into(), &target.into(), position)
    }

    fn order_of(plan: &ReorderPlan) -> Vec<(&str, u32)> {
        plan.assignments
            .iter()
            .map(|a| (a.id.as_str(), a.new_order))
            .collect()
    }

    #[test]
    fn test_root_inside_child_is_root_isolation() {
        let rejection = plan("r1", "c1", DropPosition::Inside).unwrap_err();
        assert_eq!(rejection.rule(), "root-isolation-violation");
    }

    #[test]
    fn test_root_beside_child_is_root_isolation() {
        let rejection = plan("r3", "c4", DropPosition::Before).unwrap_err();
        assert_eq!(rejection.rule(), "root-isolation-violation");
    }

    #[test]
    fn test_root_after_root_covers_root_group_only() {
        let plan = plan("r1", "r2", DropPosition::After).unwrap();

        assert_eq!(plan.parent_id, None);
        assert_eq!(order_of(&plan), [("r2", 0), ("r1", 1), ("r3", 2)]);
    }

    #[test]
    fn test_child_to_other_parent_is_reparent() {
        let rejection = plan("c1", "c4", DropPosition::Before).unwrap_err();
        assert_eq!(
            rejection,
            StructuralRejection::ReparentViolation {
                dragged: "c1".into(),
                target: "c4".into(),
                position: DropPosition::Before,
            }
        );
    }

    #[test]
    fn test_child_inside_sibling_is_reparent() {
        assert_eq!(
            plan("c1", "c2", DropPosition::Inside).unwrap_err().rule(),
            "reparent-violation"
        );
    }

    #[test]
    fn test_child_beside_root_is_reparent() {
        assert_eq!(
            plan("c4", "r1", DropPosition::After).unwrap_err().rule(),
            "reparent-violation"
        );
    }

    #[test]
    fn test_self_drop_for_every_position() {
        for id in ["r1", "c2", "r3", "ghost"] {
            for position in [DropPosition::Before, DropPosition::After, DropPosition::Inside] {
                assert_eq!(
                    plan(id, id, position).unwrap_err(),
                    StructuralRejection::SelfDrop { id: id.into() }
                );
            }
        }
    }

    #[test]
    fn test_missing_nodes() {
        assert_eq!(
            plan("nope", "c1", DropPosition::Before).unwrap_err(),
            StructuralRejection::NodeNotFound { id: "nope".into() }
        );
        assert_eq!(
            plan("c1", "nope", DropPosition::Before).unwrap_err(),
            StructuralRejection::NodeNotFound { id: "nope".into() }
        );
    }

    #[test]
    fn test_forward_move_shifts_intermediate_down() {
        let plan = plan("c1", "c3", DropPosition::After).unwrap();

        assert_eq!(plan.parent_id, Some("r1".into()));
        assert_eq!((plan.from_index, plan.to_index), (0, 2));
        assert_eq!(order_of(&plan), [("c2", 0), ("c3", 1), ("c1", 2)]);
    }

    #[test]
    fn test_backward_move_shifts_intermediate_up() {
        let plan = plan("c3", "c1", DropPosition::Before).unwrap();
        assert_eq!(order_of(&plan), [("c3", 0), ("c1", 1), ("c2", 2)]);
        assert_eq!(plan.changed().count(), 3);
    }

    #[test]
    fn test_adjacent_move_leaves_outer_nodes() {
        let plan = plan("c2", "c3", DropPosition::After).unwrap();

        assert_eq!(order_of(&plan), [("c1", 0), ("c3", 1), ("c2", 2)]);
        let changed: Vec<_> = plan.changed().map(|a| a.id.as_str()).collect();
        assert_eq!(changed, ["c3", "c2"]);
    }

    #[test]
    fn test_parent_ids_compare_by_canonical_form() {
        let roots: Vec<TreeNode> = serde_json::from_str(
            r#"[{"id": 10, "level": 0, "order": 0, "children": [
                    {"id": "a", "parentId": {"_id": "10"}, "level": 1, "order": 0},
                    {"id": "b", "parentId": 10, "level": 1, "order": 1}
               ]}]"#,
        )
        .unwrap();

        let plan = plan_reorder(&roots, &"b".into(), &"a".into(), DropPosition::Before).unwrap();
        assert_eq!(plan.new_order_of(&"b".into()), Some(0));
    }

    #[test]
    fn test_gapped_orders_are_compacted() {
        let roots = vec![
            TreeNode::root("r1", 5),
            TreeNode::root("r2", 9),
            TreeNode::root("r3", 7),
        ];
        let plan = plan_reorder(&roots, &"r2".into(), &"r1".into(), DropPosition::Before).unwrap();

        assert_eq!(order_of(&plan), [("r2", 0), ("r1", 1), ("r3", 2)]);
    }

    #[test]
    fn test_apply_returns_reordered_copy() {
        let roots = forest();
        let plan = plan_reorder(&roots, &"c1".into(), &"c3".into(), DropPosition::After).unwrap();
        let updated = plan.apply(&roots);

        let children: Vec<_> = updated[0]
            .children
            .iter()
            .map(|c| (c.id.as_str(), c.order))
            .collect();
        assert_eq!(children, [("c2", 0), ("c3", 1), ("c1", 2)]);
        assert_eq!(roots[0].children[0].id.as_str(), "c1");
        assert_eq!(updated[1], roots[1]);
    }

    #[test]
    fn test_check_matches_plan() {
        let planner = TreeReorderPlanner::new();
        let roots = forest();

        assert!(planner
            .check(&roots, &"r2".into(), &"r3".into(), DropPosition::Before)
            .is_ok());
        assert_eq!(
            planner
                .check(&roots, &"c2".into(), &"c4".into(), DropPosition::After)
                .unwrap_err()
                .rule(),
            "reparent-violation"
        );
    }

    #[test]
    fn test_blank_parent_ids_are_not_siblings() {
        let roots = vec![TreeNode::root("r", 0)
            .with_child(TreeNode::child("a", "", 1, 0))
            .with_child(TreeNode::child("b", "", 1, 1))];

        assert_eq!(
            plan_reorder(&roots, &"b".into(), &"a".into(), DropPosition::Before),
            Err(StructuralRejection::ReparentViolation {
                dragged: "b".into(),
                target: "a".into(),
                position: DropPosition::Before,
            })
        );
    }
}
