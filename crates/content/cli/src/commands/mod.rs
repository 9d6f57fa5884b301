//! CLI commands

pub mod access;
pub mod plan;
pub mod resources;

use crate::error::CliResult;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a request file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON
pub(crate) fn read_request<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&text)?),
        _ => Ok(serde_json::from_str(&text)?),
    }
}
