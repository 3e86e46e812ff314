//! # Agent Configuration
//!
//! Configuration for the batch copy agent, resolved from (lowest to highest
//! precedence) built-in defaults, an optional TOML file, `BATCH_AGENT_*`
//! environment variables, and command-line overrides.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use batch_copy_agent::config::{ConfigLoader, ConfigOverrides};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::load(&ConfigOverrides::default())?;
//! let output = config.require_output_path()?;
//! println!("copying into {}", output.display());
//! # Ok(())
//! # }
//! ```
//!
//! Required values fail fast: an unset or empty output path is a
//! [`ConfigurationError`] at agent construction, never a silent sentinel.

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::constants::defaults;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::{ConfigLoader, ConfigOverrides};

/// Resolved agent configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Deployment environment name, used for log file naming
    pub environment: String,

    /// Directory listed by standalone mode
    pub input_path: Option<PathBuf>,

    /// Directory every copied file lands in
    pub output_path: Option<PathBuf>,

    /// What a failing entry does to the rest of its batch
    pub failure_policy: FailurePolicy,

    /// Whether inputs are copied as raw bytes or validated as UTF-8 text
    pub content_mode: ContentMode,

    /// `EnvFilter` directive, e.g. `info` or `batch_copy_agent=debug`
    pub log_level: String,

    pub log_format: LogFormat,

    /// When set, a JSON log file is written here in addition to the console
    pub log_dir: Option<PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            environment: defaults::ENVIRONMENT.to_string(),
            input_path: None,
            output_path: None,
            failure_policy: FailurePolicy::default(),
            content_mode: ContentMode::default(),
            log_level: defaults::LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
            log_dir: None,
        }
    }
}

impl AgentConfig {
    /// Validate values that every mode needs regardless of which paths it uses
    pub fn validate(&self) -> ConfigResult<()> {
        if self.environment.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "environment",
                &self.environment,
                "environment name cannot be empty",
            ));
        }

        if let Err(e) = EnvFilter::try_new(&self.log_level) {
            return Err(ConfigurationError::invalid_value(
                "log_level",
                &self.log_level,
                format!("not a valid log filter directive: {e}"),
            ));
        }

        Ok(())
    }

    /// Output directory, failing when unset or empty
    pub fn require_output_path(&self) -> ConfigResult<&Path> {
        require_path(self.output_path.as_deref(), "output_path")
    }

    /// Input directory, failing when unset or empty
    pub fn require_input_path(&self) -> ConfigResult<&Path> {
        require_path(self.input_path.as_deref(), "input_path")
    }
}

fn require_path<'a>(path: Option<&'a Path>, field: &str) -> ConfigResult<&'a Path> {
    match path {
        Some(p) if !p.as_os_str().is_empty() => Ok(p),
        _ => Err(ConfigurationError::missing_required_field(
            field,
            "agent configuration",
        )),
    }
}

/// How a batch reacts to a failing entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// First failure aborts the batch and propagates
    #[default]
    #[serde(alias = "abort")]
    AbortBatch,
    /// Every entry is attempted; failures are collected in the report
    #[serde(alias = "continue")]
    ContinueOnFailure,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbortBatch => "abort_batch",
            Self::ContinueOnFailure => "continue_on_failure",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "abort" | "abort_batch" => Ok(Self::AbortBatch),
            "continue" | "continue_on_failure" => Ok(Self::ContinueOnFailure),
            _ => Err(ConfigurationError::invalid_value(
                "failure_policy",
                s,
                "expected 'abort' or 'continue'",
            )),
        }
    }
}

/// How input bytes are treated on the way through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    #[default]
    Binary,
    /// Inputs that are not valid UTF-8 are rejected as unreadable
    Text,
}

impl ContentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(Self::Binary),
            "text" => Ok(Self::Text),
            _ => Err(ConfigurationError::invalid_value(
                "content_mode",
                s,
                "expected 'binary' or 'text'",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
