//! Configuration Loader
//!
//! Environment-aware configuration loading. Loads a `.env` file if present,
//! then layers an optional TOML file, `BATCH_AGENT_*` environment variables,
//! and explicit overrides with the `config` crate before validating the result.

use super::error::{ConfigResult, ConfigurationError};
use super::{AgentConfig, ContentMode, FailurePolicy};
use crate::constants::{defaults, env_vars};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Values supplied explicitly by the caller, usually parsed command-line flags
///
/// Every `Some` wins over file and environment layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// TOML file to layer beneath the environment
    pub config_file: Option<PathBuf>,
    /// Dotenv file loaded before anything else (default `./.env`)
    pub env_file: Option<PathBuf>,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub failure_policy: Option<FailurePolicy>,
    pub content_mode: Option<ContentMode>,
    pub log_level: Option<String>,
}

/// Stateless configuration loader
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment
    ///
    /// Loads the dotenv file first so its values participate in every later layer.
    pub fn load(overrides: &ConfigOverrides) -> ConfigResult<AgentConfig> {
        let env_file = overrides
            .env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::ENV_FILE));
        Self::load_env_file(&env_file)?;

        Self::load_with_env(overrides, None)
    }

    /// Load configuration against an explicit environment map
    ///
    /// `None` reads the real process environment. Passing a map keeps tests
    /// independent of whatever the host happens to export.
    pub fn load_with_env(
        overrides: &ConfigOverrides,
        env: Option<HashMap<String, String>>,
    ) -> ConfigResult<AgentConfig> {
        let lookup = |key: &str| -> Option<String> {
            match &env {
                Some(map) => map.get(key).cloned(),
                None => std::env::var(key).ok(),
            }
        };

        let environment = lookup(env_vars::ENVIRONMENT)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| defaults::ENVIRONMENT.to_string());
        let log_level = lookup(env_vars::PIPELINE_LOG_LEVEL)
            .filter(|value| !value.trim().is_empty())
            .map(|value| pipeline_level_to_directive(&value))
            .unwrap_or_else(|| defaults::LOG_LEVEL.to_string());

        let mut builder = Config::builder()
            .set_default("environment", environment)?
            .set_default("log_level", log_level)?;

        let config_file = overrides
            .config_file
            .clone()
            .or_else(|| lookup(env_vars::CONFIG_PATH).map(PathBuf::from));
        if let Some(path) = &config_file {
            if !path.is_file() {
                return Err(ConfigurationError::config_file_not_found(vec![path.clone()]));
            }
            debug!("Layering configuration file: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        builder = builder
            .add_source(Environment::with_prefix(env_vars::PREFIX).source(env))
            .set_override_option("input_path", path_value(&overrides.input_path))?
            .set_override_option("output_path", path_value(&overrides.output_path))?
            .set_override_option(
                "failure_policy",
                overrides.failure_policy.map(|p| p.as_str().to_string()),
            )?
            .set_override_option(
                "content_mode",
                overrides.content_mode.map(|m| m.as_str().to_string()),
            )?
            .set_override_option("log_level", overrides.log_level.clone())?;

        let config: AgentConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            environment = %config.environment,
            failure_policy = %config.failure_policy,
            content_mode = %config.content_mode,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Load a dotenv file into the process environment, overriding existing values
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_env_file(path: &Path) -> ConfigResult<bool> {
        match dotenvy::from_path_override(path) {
            Ok(()) => {
                debug!("Loaded environment file: {}", path.display());
                Ok(true)
            }
            Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ConfigurationError::env_file_error(
                path.display().to_string(),
                e,
            )),
        }
    }
}

/// Translate pipeline level names (`WARNING`, `CRITICAL`, ...) into filter directives
fn pipeline_level_to_directive(level: &str) -> String {
    match level.trim().to_ascii_uppercase().as_str() {
        "WARNING" => "warn".to_string(),
        "CRITICAL" | "FATAL" => "error".to_string(),
        "NOTSET" => "trace".to_string(),
        _ => level.trim().to_ascii_lowercase(),
    }
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}
