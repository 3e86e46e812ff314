//! # Structured Logging Module
//!
//! Environment-aware structured logging to the console, plus an optional
//! JSON log file for runs whose console output is not retained.

use chrono::Utc;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};
use uuid::Uuid;

use crate::config::{AgentConfig, LogFormat};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();
static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize structured logging from the agent configuration
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_structured_logging(config: &AgentConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let mut layers: Vec<BoxedLayer> = vec![console_layer(config)];

        let mut file_error = None;
        let mut log_path = None;
        if let Some(dir) = config.log_dir.as_deref() {
            match file_layer(dir, &config.environment, &config.log_level) {
                Ok((layer, path)) => {
                    layers.push(layer);
                    log_path = Some(path.display().to_string());
                }
                Err(e) => file_error = Some((dir.display().to_string(), e)),
            }
        }

        // Another subscriber (a host process, a test harness) may already be installed
        if tracing_subscriber::registry().with(layers).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = process::id(),
            environment = %config.environment,
            log_level = %config.log_level,
            log_file = log_path.as_deref().unwrap_or("none"),
            "Structured logging initialized"
        );

        if let Some((dir, e)) = file_error {
            tracing::warn!(
                log_dir = %dir,
                "Unable to create log directory, file logging disabled: {e}"
            );
        }
    });
}

fn console_layer(config: &AgentConfig) -> BoxedLayer {
    let filter = EnvFilter::new(&config.log_level);
    match config.log_format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_ansi(std::io::stderr().is_terminal())
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// JSON file layer named `<environment>.<pid>.<timestamp>.log`
fn file_layer(
    dir: &Path,
    environment: &str,
    log_level: &str,
) -> io::Result<(BoxedLayer, PathBuf)> {
    fs::create_dir_all(dir)?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let file_name = format!("{}.{}.{}.log", environment, process::id(), timestamp);
    let log_path = dir.join(&file_name);

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_WRITER_GUARD.set(guard);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(false)
        .json()
        .with_filter(EnvFilter::new(log_level))
        .boxed();

    Ok((layer, log_path))
}

/// Log structured data for batch-level milestones
pub fn log_batch_operation(
    operation: &str,
    batch_id: Uuid,
    status: &str,
    entries: usize,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        batch_id = %batch_id,
        status = %status,
        entries = entries,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "BATCH_OPERATION"
    );
}

/// Timestamped progress line emitted before each entry is copied
pub fn log_entry_progress(batch_id: Uuid, position: usize, entry: &Path) {
    tracing::info!(
        batch_id = %batch_id,
        position = position,
        timestamp = %Utc::now().to_rfc3339(),
        "Processing file: {}",
        entry.display()
    );
}
