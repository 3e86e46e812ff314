#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Batch Copy Agent
//!
//! Copies batches of files from an input location into a flat output
//! directory, one batch per invocation.
//!
//! ## Overview
//!
//! The agent runs in one of two modes:
//!
//! - **Standalone**: list an input directory and copy all of its files
//!   ([`standalone::run_standalone`]).
//! - **Mini-batch**: a batch orchestrator calls `init` once, then `run` with
//!   each pre-partitioned mini-batch ([`handler::MiniBatchHandler`]).
//!
//! Both share [`BatchCopyAgent`], which copies entries in batch order with
//! blocking I/O. By default the first failing entry aborts its batch and
//! the error propagates; parallelism, retries, and failure thresholds belong
//! to the orchestrator.
//!
//! ## Module Organization
//!
//! - [`batch_processing`] - The copy agent, output naming, and batch reports
//! - [`handler`] - Mini-batch entry contract and the copy job handler
//! - [`standalone`] - Directory-listing runner
//! - [`config`] - Layered configuration loading
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup and helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batch_copy_agent::config::{ConfigLoader, ConfigOverrides};
//! use batch_copy_agent::handler::{CopyJobHandler, MiniBatchHandler};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::load(&ConfigOverrides {
//!     output_path: Some(PathBuf::from("/mnt/outputs")),
//!     ..ConfigOverrides::default()
//! })?;
//!
//! let mut handler = CopyJobHandler::new();
//! handler.init(&config)?;
//! let processed = handler.run(vec![PathBuf::from("/mnt/inputs/a.txt")])?;
//! println!("processed {} files", processed.len());
//! # Ok(())
//! # }
//! ```

pub mod batch_processing;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod logging;
pub mod standalone;

pub use batch_processing::{BatchCopyAgent, BatchReport, CopiedFile, FailedEntry};
pub use config::{AgentConfig, ConfigurationError, ContentMode, FailurePolicy};
pub use error::{AgentError, ErrorKind, Result};
pub use handler::{CopyJobHandler, MiniBatchHandler};
pub use standalone::{list_input_entries, run_standalone};
