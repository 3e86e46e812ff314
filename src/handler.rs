//! # Mini-Batch Handlers
//!
//! The entry-script contract a batch orchestrator drives: one `init` call per
//! process, then one `run` call per mini-batch it hands out. The orchestrator
//! owns partitioning, retries, and failure thresholds; handlers only process
//! what they are given and report back.

use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::batch_processing::{BatchCopyAgent, BatchReport};
use crate::config::{AgentConfig, ConfigurationError, FailurePolicy};
use crate::constants::operations;
use crate::error::Result;
use crate::logging::log_batch_operation;

/// Trait for handlers invoked once per mini-batch
pub trait MiniBatchHandler: Send + Sync {
    /// Prepare the handler for subsequent `run` calls
    ///
    /// # Arguments
    ///
    /// * `config` - Resolved agent configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Handler is ready
    /// * `Err` - Configuration is unusable; no mini-batch should be dispatched
    fn init(&mut self, config: &AgentConfig) -> Result<()>;

    /// Process one mini-batch and return the items that were processed
    ///
    /// An `Err` tells the orchestrator the whole mini-batch failed.
    fn run(&self, mini_batch: Vec<PathBuf>) -> Result<Vec<PathBuf>>;

    /// Get the handler name for identification in logs
    fn handler_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Mini-batch handler that copies every entry into the configured output directory
#[derive(Debug, Default)]
pub struct CopyJobHandler {
    agent: Option<BatchCopyAgent>,
    failure_policy: FailurePolicy,
}

impl CopyJobHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.agent.is_some()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Process one mini-batch and return the full report
    ///
    /// Under [`FailurePolicy::AbortBatch`] the first failing entry is returned
    /// as the error. Under [`FailurePolicy::ContinueOnFailure`] failures are
    /// logged and recorded in the report.
    pub fn run_with_report(&self, mini_batch: &[PathBuf]) -> Result<BatchReport> {
        let agent = self.agent.as_ref().ok_or_else(|| {
            ConfigurationError::missing_required_field(
                "output_path",
                format!("{} (run called before init)", self.handler_name()),
            )
        })?;

        info!(entries = mini_batch.len(), "running job");

        let report = agent
            .process_with_policy(mini_batch, self.failure_policy)
            .inspect_err(|e| error!("Failed to run job: {e}"))?;

        for failed in &report.failed {
            warn!(
                entry = %failed.path.display(),
                error_kind = %failed.kind,
                "Entry not processed: {}",
                failed.message
            );
        }

        info!(
            batch_id = %report.batch_id,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "job completed"
        );

        Ok(report)
    }
}

impl MiniBatchHandler for CopyJobHandler {
    fn init(&mut self, config: &AgentConfig) -> Result<()> {
        let agent = BatchCopyAgent::from_config(config)?;

        info!(
            handler = self.handler_name(),
            job_output_path = %agent.output_path().display(),
            failure_policy = %config.failure_policy,
            "init done"
        );

        self.agent = Some(agent);
        self.failure_policy = config.failure_policy;
        Ok(())
    }

    fn run(&self, mini_batch: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        let report = self.run_with_report(&mini_batch)?;
        log_batch_operation(
            operations::RUN,
            report.batch_id,
            report.status(),
            mini_batch.len(),
            Some(self.handler_name()),
        );

        match self.failure_policy {
            FailurePolicy::AbortBatch => Ok(mini_batch),
            FailurePolicy::ContinueOnFailure => Ok(report.succeeded),
        }
    }
}
