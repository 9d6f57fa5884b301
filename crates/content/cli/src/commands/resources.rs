//! Resource registry listing

use crate::error::CliResult;
use crate::output::{print_structured, OutputFormat};
use colored::Colorize;
use content_access::known_resource_types;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceEntry {
    resource_type: &'static str,
    resource: &'static str,
}

/// Print every registered resource type with its permission resource name
pub fn execute(format: OutputFormat) -> CliResult<()> {
    let entries: Vec<ResourceEntry> = known_resource_types()
        .map(|(resource_type, resource)| ResourceEntry {
            resource_type,
            resource,
        })
        .collect();

    if print_structured(&entries, format)? {
        return Ok(());
    }

    println!("{}", "Resource Types".bold().cyan());
    println!("{}", "=".repeat(60));
    for entry in &entries {
        println!(
            "  {:<28} {} {}",
            entry.resource_type.bold(),
            "→".dimmed(),
            entry.resource
        );
    }
    println!();
    println!(
        "{}: unregistered types use their name plus \"s\"",
        "Note".bold()
    );

    Ok(())
}
