//! contentctl - command-line interface for the content workflow engine
//!
//! This CLI lets operators and developers:
//! - Evaluate edit/delete/create-child/reorder decisions for a request
//! - Plan (and preview) drag-and-drop reorders of a content tree
//! - List the resource-type registry

use clap::{Parser, Subcommand};
use content_governor::{ContentGovernor, GovernorConfig, GovernorError};
use std::ffi::OsString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{access, plan, resources};
pub use error::{CliError, CliResult};
pub use output::OutputFormat;

/// contentctl application
#[derive(Parser)]
#[command(name = "contentctl")]
#[command(about = "Content workflow access and tree ordering CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONTENT_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Evaluate all four access decisions for a subject and actor
    Access(access::AccessArgs),

    /// Plan a drag-and-drop reorder
    Plan(plan::PlanArgs),

    /// List registered resource types
    Resources,

    /// Show the effective configuration
    Config,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let config = GovernorConfig::load(cli.config.as_deref()).map_err(GovernorError::from)?;

    // Initialize tracing; logs go to stderr so structured output stays clean
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let json = config.logging.json;
    // A global subscriber may already be set when running in-process
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr)
        }))
        .try_init()
        .ok();

    tracing::debug!(
        config = cli.config.as_deref().unwrap_or("-"),
        strict = config.status.strict,
        child_resource = %config.access.child_resource,
        "Configuration loaded"
    );
    let governor = ContentGovernor::from_config(&config);

    // Execute command
    match cli.command {
        Commands::Access(args) => access::execute(args, &governor, cli.output),
        Commands::Plan(args) => plan::execute(args, &governor, cli.output),
        Commands::Resources => resources::execute(cli.output),
        Commands::Config => show_config(&config, cli.output),
    }
}

fn show_config(config: &GovernorConfig, format: OutputFormat) -> CliResult<()> {
    use colored::Colorize;

    if output::print_structured(config, format)? {
        return Ok(());
    }

    println!("{}", "Governor Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  Strict status:   {}", config.status.strict);
    println!("  Child resource:  {}", config.access.child_resource);
    println!("  Log level:       {}", config.logging.level);
    println!("  JSON logs:       {}", config.logging.json);
    println!("  Emit decisions:  {}", config.logging.emit_decisions);
    if config.capabilities.is_empty() {
        println!("  Capabilities:    {}", "none".dimmed());
    } else {
        println!("  Capabilities:    {}", "configured".green());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_in_process_runs() {
        assert!(run_with_args(["contentctl", "--output", "json", "resources"]).is_ok());
        assert!(run_with_args(["contentctl", "--output", "yaml", "config"]).is_ok());
    }
}
