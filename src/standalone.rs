//! # Standalone Runner
//!
//! Single-process mode: list an input directory and copy everything in it as
//! one batch. Only regular files become batch entries, sorted by name so two
//! runs over the same directory copy in the same order.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::batch_processing::{BatchCopyAgent, BatchReport};
use crate::config::AgentConfig;
use crate::constants::operations;
use crate::error::{AgentError, Result};
use crate::logging::log_batch_operation;

/// Regular files directly inside `input_dir`, sorted by file name
pub fn list_input_entries(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let listing = fs::read_dir(input_dir).map_err(|e| AgentError::missing_input(input_dir, e))?;

    let mut entries = Vec::new();
    for dir_entry in listing {
        let path = dir_entry
            .map_err(|e| AgentError::missing_input(input_dir, e))?
            .path();

        if path.is_file() {
            entries.push(path);
        } else {
            debug!("Skipping non-file entry {}", path.display());
        }
    }

    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Copy every file in the configured input directory to the output directory
///
/// # Errors
///
/// * `Configuration` - input or output path unset
/// * `MissingInput` - input directory unreadable, or an entry failed under
///   [`crate::config::FailurePolicy::AbortBatch`]
/// * `WriteFailure` - an output could not be written under `AbortBatch`
pub fn run_standalone(config: &AgentConfig) -> Result<BatchReport> {
    let input_path = config.require_input_path()?;
    let agent = BatchCopyAgent::from_config(config)?;

    info!(
        job_input_path = %input_path.display(),
        job_output_path = %agent.output_path().display(),
        failure_policy = %config.failure_policy,
        "Starting standalone copy"
    );

    let entries = list_input_entries(input_path)?;
    let report = agent.process_with_policy(&entries, config.failure_policy)?;

    log_batch_operation(
        operations::STANDALONE,
        report.batch_id,
        report.status(),
        entries.len(),
        Some(&input_path.display().to_string()),
    );

    Ok(report)
}
