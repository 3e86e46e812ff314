//! Batch Processing
//!
//! The copy agent and the types it reports with.
//!
//! - [`BatchCopyAgent`]: copies a batch of input files into one output directory
//! - [`BatchReport`]: per-invocation outcome, serializable for CLI output
//! - [`naming`]: how input paths map to output file names

mod copy_agent;
pub mod naming;
mod report;

pub use copy_agent::BatchCopyAgent;
pub use report::{BatchReport, CopiedFile, FailedEntry};
