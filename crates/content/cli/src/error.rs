//! CLI error types

use content_governor::GovernorError;
use std::process::ExitCode;
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Governor(#[from] GovernorError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Denials and structural rejections exit with 2, everything else with 1
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Governor(GovernorError::Denied { .. })
            | CliError::Governor(GovernorError::Structural(_)) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
