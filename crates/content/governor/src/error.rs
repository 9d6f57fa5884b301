//! Error types for governed content operations

use content_tree::StructuralRejection;
use content_types::ContentError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Governed operation errors
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernorError {
    /// The actor is not permitted to perform the operation
    #[error("{operation} denied: {reason}")]
    Denied { operation: String, reason: String },

    /// The move breaks a tree rule
    #[error("Structural rejection: {0}")]
    Structural(#[from] StructuralRejection),

    /// The subject failed validation
    #[error("Invalid subject: {0}")]
    Invalid(#[from] ContentError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GovernorError {
    /// User-facing reason for a denial or rejection
    pub fn reason(&self) -> String {
        match self {
            GovernorError::Denied { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_denial(&self) -> bool {
        matches!(self, GovernorError::Denied { .. })
    }
}

impl From<config::ConfigError> for GovernorError {
    fn from(err: config::ConfigError) -> Self {
        GovernorError::Config(err.to_string())
    }
}

/// Result type for governed operations
pub type GovernorResult<T> = std::result::Result<T, GovernorError>;
