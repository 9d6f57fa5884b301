//! Access decision commands

use super::read_request;
use crate::error::CliResult;
use crate::output::{print_structured, OutputFormat};
use clap::Args;
use colored::Colorize;
use content_governor::ContentGovernor;
use content_types::{Actor, EvaluationSubject};
use serde::Deserialize;
use std::path::PathBuf;

/// Arguments for `contentctl access`
#[derive(Args)]
pub struct AccessArgs {
    /// Request file (JSON or YAML) holding `subject` and `actor`
    #[arg(short, long)]
    pub request: PathBuf,
}

/// Contents of an access request file
#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    pub subject: EvaluationSubject,
    #[serde(default)]
    pub actor: Actor,
}

/// Evaluate all four decisions for the requested subject and actor
pub fn execute(args: AccessArgs, governor: &ContentGovernor, format: OutputFormat) -> CliResult<()> {
    let request: AccessRequest = read_request(&args.request)?;
    let summary = governor.summarize(&request.subject, &request.actor)?;

    if print_structured(&summary, format)? {
        return Ok(());
    }

    let actor = request
        .actor
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());
    println!(
        "{} {} ({}) as {} [{}]",
        "Access for".bold().cyan(),
        request.subject.resource_type.bold(),
        request.subject.status,
        actor,
        request.actor.role
    );
    println!("{}", "=".repeat(60));
    for (name, decision) in summary.entries() {
        match decision.reason() {
            None => println!("  {} {}", "✓".green(), name.bold()),
            Some(reason) => {
                println!("  {} {}", "✗".red(), name.bold());
                println!("      {}", reason.dimmed());
            }
        }
    }

    Ok(())
}
