//! Batch outcome reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::FailurePolicy;
use crate::error::{AgentError, ErrorKind};

/// A single successful copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// An entry that could not be copied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of one batch invocation
///
/// `succeeded` keeps batch order. Under [`FailurePolicy::AbortBatch`] a report
/// only escapes the agent when every entry succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Correlates the log lines of one invocation
    pub batch_id: Uuid,
    pub policy: FailurePolicy,
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<FailedEntry>,
    pub bytes_copied: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchReport {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            policy,
            succeeded: Vec::new(),
            failed: Vec::new(),
            bytes_copied: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record_success(&mut self, copied: CopiedFile) {
        self.bytes_copied += copied.bytes;
        self.succeeded.push(copied.source);
    }

    pub fn record_failure(&mut self, path: &Path, error: &AgentError) {
        self.failed.push(FailedEntry {
            path: path.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Entries attempted so far, successful or not
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn status(&self) -> &'static str {
        match (self.succeeded.is_empty(), self.failed.is_empty()) {
            (_, true) => "completed",
            (false, false) => "completed_with_failures",
            (true, false) => "failed",
        }
    }
}
