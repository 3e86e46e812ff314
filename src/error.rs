//! # Agent Error Types
//!
//! Every failure the agent can surface falls into one of three kinds:
//! an input that cannot be read, an output that cannot be written, or a
//! configuration that cannot be used. Errors are never retried locally;
//! they propagate to whoever drives the batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ConfigurationError;

/// Batch copy agent error type
#[derive(Error, Debug)]
pub enum AgentError {
    /// Input file not found, unreadable, or not a usable file reference
    ///
    /// The cause is rendered into the message and not chained as a source,
    /// so `{:#}` formatting prints it once.
    #[error("Missing input '{}': {reason}", path.display())]
    MissingInput { path: PathBuf, reason: String },

    /// Output path not writable, disk full, permission denied
    #[error("Failed to write '{}': {error}", path.display())]
    WriteFailure { path: PathBuf, error: io::Error },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl AgentError {
    /// Input could not be opened or read
    pub fn missing_input(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::MissingInput {
            path: path.as_ref().to_path_buf(),
            reason: source.to_string(),
        }
    }

    /// Input reference is unusable for a reason other than an I/O failure
    pub fn unusable_input(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::MissingInput {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn write_failure(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::WriteFailure {
            path: path.as_ref().to_path_buf(),
            error: source,
        }
    }

    /// Coarse classification used in batch reports and logs
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput { .. } => ErrorKind::MissingInput,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }
}

/// Error classification without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingInput,
    WriteFailure,
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => write!(f, "missing_input"),
            Self::WriteFailure => write!(f, "write_failure"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

/// Result type alias for AgentError
pub type Result<T> = std::result::Result<T, AgentError>;
