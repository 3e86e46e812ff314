//! # Agent Constants
//!
//! Environment variable names, defaults, and log operation labels shared by
//! the library and the command-line entry point.

/// Environment variables read during configuration loading
pub mod env_vars {
    /// Prefix for layered configuration overrides (`BATCH_AGENT_OUTPUT_PATH`, ...)
    pub const PREFIX: &str = "BATCH_AGENT";

    /// Path to an optional TOML configuration file
    pub const CONFIG_PATH: &str = "BATCH_AGENT_CONFIG_PATH";

    /// Deployment environment name (development, test, production)
    pub const ENVIRONMENT: &str = "BATCH_AGENT_ENV";

    /// Pipeline-level log level injected by the job definition
    pub const PIPELINE_LOG_LEVEL: &str = "AML_LOG_LEVEL";
}

/// Configuration defaults
pub mod defaults {
    pub const ENVIRONMENT: &str = "development";
    pub const LOG_LEVEL: &str = "info";
    pub const ENV_FILE: &str = "./.env";
}

/// Operation labels used by structured batch logging
pub mod operations {
    pub const RUN: &str = "run";
    pub const STANDALONE: &str = "standalone";
}
