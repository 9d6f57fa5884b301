//! Error types for content domain values

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing or validating domain values.
///
/// Permission denials are never reported through this type; they are
/// ordinary [`Decision`](crate::Decision) values.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentError {
    /// Status string outside the closed workflow status set
    #[error("Unknown workflow status: {0}")]
    UnknownStatus(String),

    /// Subject without a resource type
    #[error("Resource type must not be empty")]
    EmptyResourceType,

    /// Identifier that is empty after trimming
    #[error("Identifier must not be blank")]
    BlankIdentifier,
}

/// Result type for content domain operations
pub type ContentResult<T> = std::result::Result<T, ContentError>;
