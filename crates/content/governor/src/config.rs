//! Configuration for the content governor

use content_access::{StaticCapabilities, DEFAULT_CHILD_RESOURCE};
use serde::{Deserialize, Serialize};

/// Main governor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Status handling
    #[serde(default)]
    pub status: StatusConfig,

    /// Access evaluation
    #[serde(default)]
    pub access: AccessConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Static capability table, used when no permission store is wired in
    #[serde(default)]
    pub capabilities: StaticCapabilities,
}

/// Status handling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Reject statuses outside the workflow set instead of soft-denying
    #[serde(default)]
    pub strict: bool,
}

/// Access evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Resource name child creation is checked against
    #[serde(default = "default_child_resource")]
    pub child_resource: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            child_resource: default_child_resource(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,

    /// Emit one log line per governed decision
    #[serde(default = "default_true")]
    pub emit_decisions: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            emit_decisions: true,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_child_resource() -> String {
    DEFAULT_CHILD_RESOURCE.to_string()
}

impl GovernorConfig {
    /// Load configuration from an optional file, then `CONTENT_` environment
    /// variables (`CONTENT_STATUS__STRICT=true`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&GovernorConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        // Add environment variables with CONTENT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("CONTENT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
