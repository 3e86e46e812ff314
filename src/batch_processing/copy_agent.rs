//! # Batch Copy Agent
//!
//! Copies each entry of a batch into a single output directory under the
//! entry's base name. Entries are processed in batch order with blocking I/O.
//!
//! ## Failure semantics
//!
//! [`BatchCopyAgent::process`] aborts on the first failing entry: later
//! entries are not touched and the error is returned to the caller.
//! [`BatchCopyAgent::process_isolated`] attempts every entry and reports
//! per-entry outcomes instead.
//!
//! Writes are plain truncate-and-write. A copy interrupted mid-write leaves a
//! truncated destination; re-running the batch overwrites it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use batch_copy_agent::BatchCopyAgent;
//!
//! # fn main() -> batch_copy_agent::Result<()> {
//! let agent = BatchCopyAgent::new("/out")?;
//! let batch = vec!["/in/a.txt", "/in/b.txt"];
//! let processed = agent.process(batch)?;
//! assert_eq!(processed, vec!["/in/a.txt", "/in/b.txt"]);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use super::naming::output_path_for;
use super::report::{BatchReport, CopiedFile};
use crate::config::{AgentConfig, ConfigurationError, ContentMode, FailurePolicy};
use crate::constants::operations;
use crate::error::{AgentError, Result};
use crate::logging::{log_batch_operation, log_entry_progress};

/// Copies batches of files into one output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCopyAgent {
    output_path: PathBuf,
    content_mode: ContentMode,
}

impl BatchCopyAgent {
    /// Create an agent writing into `output_path`
    ///
    /// The directory is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// * `Configuration` - the path is empty, or exists and is not a directory
    /// * `WriteFailure` - the directory could not be created
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self> {
        let output_path = output_path.into();

        if output_path.as_os_str().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "output_path",
                "batch copy agent initialization",
            )
            .into());
        }

        if output_path.exists() {
            if !output_path.is_dir() {
                return Err(ConfigurationError::invalid_value(
                    "output_path",
                    output_path.display().to_string(),
                    "exists but is not a directory",
                )
                .into());
            }
        } else {
            fs::create_dir_all(&output_path)
                .map_err(|e| AgentError::write_failure(&output_path, e))?;
            debug!("Created output directory {}", output_path.display());
        }

        Ok(Self {
            output_path,
            content_mode: ContentMode::default(),
        })
    }

    /// Create an agent from resolved configuration
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let output_path = config.require_output_path()?;
        Ok(Self::new(output_path)?.with_content_mode(config.content_mode))
    }

    pub fn with_content_mode(mut self, content_mode: ContentMode) -> Self {
        self.content_mode = content_mode;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    /// Where `entry` will be written
    pub fn destination_for(&self, entry: &Path) -> Result<PathBuf> {
        output_path_for(&self.output_path, entry)
    }

    /// Copy a single entry into the output directory
    ///
    /// The input is read completely before the destination is opened, so an
    /// unreadable input never creates or truncates an output file.
    pub fn copy_entry(&self, entry: &Path) -> Result<CopiedFile> {
        let destination = self.destination_for(entry)?;

        let content = fs::read(entry).map_err(|e| AgentError::missing_input(entry, e))?;

        if self.content_mode == ContentMode::Text {
            if let Err(e) = std::str::from_utf8(&content) {
                return Err(AgentError::unusable_input(
                    entry,
                    format!("not valid UTF-8 text: {e}"),
                ));
            }
        }

        fs::write(&destination, &content)
            .map_err(|e| AgentError::write_failure(&destination, e))?;

        debug!(
            source = %entry.display(),
            destination = %destination.display(),
            bytes = content.len(),
            "Copied entry"
        );

        Ok(CopiedFile {
            source: entry.to_path_buf(),
            destination,
            bytes: content.len() as u64,
        })
    }

    /// Copy every entry in order, aborting on the first failure
    ///
    /// Returns the original batch when every entry was copied.
    pub fn process<P: AsRef<Path>>(&self, batch: Vec<P>) -> Result<Vec<P>> {
        self.process_with_policy(&batch, FailurePolicy::AbortBatch)?;
        Ok(batch)
    }

    /// Copy every entry in order, collecting failures instead of aborting
    pub fn process_isolated<P: AsRef<Path>>(&self, batch: &[P]) -> BatchReport {
        let (report, _) = self.execute(batch, FailurePolicy::ContinueOnFailure);
        report
    }

    /// Copy a batch under an explicit failure policy
    ///
    /// Only [`FailurePolicy::AbortBatch`] can return an error.
    pub fn process_with_policy<P: AsRef<Path>>(
        &self,
        batch: &[P],
        policy: FailurePolicy,
    ) -> Result<BatchReport> {
        match self.execute(batch, policy) {
            (report, None) => Ok(report),
            (_, Some(e)) => Err(e),
        }
    }

    fn execute<P: AsRef<Path>>(
        &self,
        batch: &[P],
        policy: FailurePolicy,
    ) -> (BatchReport, Option<AgentError>) {
        let mut report = BatchReport::new(policy);
        log_batch_operation(
            operations::RUN,
            report.batch_id,
            "started",
            batch.len(),
            Some(policy.as_str()),
        );

        for (position, entry) in batch.iter().enumerate() {
            let entry = entry.as_ref();
            log_entry_progress(report.batch_id, position, entry);

            match self.copy_entry(entry) {
                Ok(copied) => report.record_success(copied),
                Err(e) if policy == FailurePolicy::AbortBatch => {
                    error!(
                        batch_id = %report.batch_id,
                        entry = %entry.display(),
                        error_kind = %e.kind(),
                        remaining = batch.len() - position - 1,
                        "Entry failed, aborting batch: {e}"
                    );
                    report.record_failure(entry, &e);
                    report.finish();
                    log_batch_operation(
                        operations::RUN,
                        report.batch_id,
                        "aborted",
                        report.attempted(),
                        Some(&e.to_string()),
                    );
                    return (report, Some(e));
                }
                Err(e) => {
                    warn!(
                        batch_id = %report.batch_id,
                        entry = %entry.display(),
                        error_kind = %e.kind(),
                        "Entry failed, continuing with batch: {e}"
                    );
                    report.record_failure(entry, &e);
                }
            }
        }

        report.finish();
        log_batch_operation(
            operations::RUN,
            report.batch_id,
            report.status(),
            report.attempted(),
            None,
        );

        (report, None)
    }
}
