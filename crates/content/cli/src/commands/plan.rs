//! Reorder planning commands

use super::read_request;
use crate::error::CliResult;
use crate::output::{print_structured, OutputFormat};
use clap::Args;
use colored::Colorize;
use content_governor::{ContentGovernor, GovernorError};
use content_tree::{ReorderPlan, TreeReorderPlanner};
use content_types::{Actor, DropPosition, EvaluationSubject, ResourceId, TreeNode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Arguments for `contentctl plan`
#[derive(Args)]
pub struct PlanArgs {
    /// Request file (JSON or YAML) holding the tree and the move
    #[arg(short, long)]
    pub request: PathBuf,

    /// Also print the tree with the plan applied
    #[arg(long)]
    pub apply: bool,
}

/// Contents of a plan request file.
///
/// When `subject` is given the move is also checked against the actor's
/// reorder permission; without it only the tree rules apply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub tree: Vec<TreeNode>,
    pub dragged_id: ResourceId,
    pub target_id: ResourceId,
    pub position: DropPosition,
    #[serde(default)]
    pub subject: Option<EvaluationSubject>,
    #[serde(default)]
    pub actor: Option<Actor>,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    plan: &'a ReorderPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<Vec<TreeNode>>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum Refusal<'a> {
    Denied { reason: &'a str },
}

/// Plan the requested move, or report why it is refused
pub fn execute(args: PlanArgs, governor: &ContentGovernor, format: OutputFormat) -> CliResult<()> {
    let request: PlanRequest = read_request(&args.request)?;

    let result = match &request.subject {
        Some(subject) => governor.authorize_reorder(
            subject,
            &request.actor.clone().unwrap_or_default(),
            &request.tree,
            &request.dragged_id,
            &request.target_id,
            request.position,
        ),
        None => TreeReorderPlanner::new()
            .plan(
                &request.tree,
                &request.dragged_id,
                &request.target_id,
                request.position,
            )
            .map_err(GovernorError::from),
    };

    let plan = match result {
        Ok(plan) => plan,
        Err(err) => {
            report_refusal(&err, format)?;
            return Err(err.into());
        }
    };

    let report = PlanReport {
        plan: &plan,
        tree: args.apply.then(|| plan.apply(&request.tree)),
    };
    if print_structured(&report, format)? {
        return Ok(());
    }

    let parent = plan
        .parent_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "root".to_string());
    println!(
        "{} {} {} {} (siblings under {})",
        "Reorder plan:".bold().cyan(),
        plan.dragged_id.to_string().bold(),
        plan.position,
        plan.target_id.to_string().bold(),
        parent
    );
    println!("{}", "=".repeat(60));
    for assignment in &plan.assignments {
        let marker = if assignment.is_changed() {
            "●".yellow()
        } else {
            "○".dimmed()
        };
        println!(
            "  {} {:>3}  {}  {}",
            marker,
            assignment.new_order,
            assignment.id,
            format!("(was {})", assignment.previous_order).dimmed()
        );
    }
    println!();
    if plan.is_noop() {
        println!("{}", "No orders change".dimmed());
    } else {
        println!("{} of {} siblings change order", plan.changed().count(), plan.len());
    }

    if let Some(tree) = report.tree {
        println!();
        println!("{}", "Reordered tree".bold().cyan());
        print_tree(&tree, 1);
    }

    Ok(())
}

fn report_refusal(err: &GovernorError, format: OutputFormat) -> CliResult<()> {
    match err {
        GovernorError::Structural(rejection) => {
            if !print_structured(rejection, format)? {
                println!("{} {}", "✗".red(), rejection.rule().bold());
                println!("    {}", rejection);
            }
        }
        GovernorError::Denied { reason, .. } => {
            if !print_structured(&Refusal::Denied { reason }, format)? {
                println!("{} {}", "✗".red(), "denied".bold());
                println!("    {}", reason);
            }
        }
        _ => {}
    }
    Ok(())
}

fn print_tree(nodes: &[TreeNode], depth: usize) {
    for node in nodes {
        println!("{}{} {}", "  ".repeat(depth), node.order, node.id);
        print_tree(&node.children, depth + 1);
    }
}
