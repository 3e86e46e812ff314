//! Command-line parsing
//!
//! Parsing is non-strict: orchestrators append their own flags (for example
//! `--resource_monitor_interval 0`) to every entry-script invocation, so
//! anything the agent does not recognize is set aside instead of rejected.

use batch_copy_agent::config::ConfigOverrides;
use batch_copy_agent::{ContentMode, FailurePolicy};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "batch-copy-agent")]
#[command(about = "Copy batches of files into a flat output directory")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Directory whose files are copied in standalone mode
    #[arg(long = "job_input_path", alias = "job-input-path", global = true)]
    pub job_input_path: Option<PathBuf>,

    /// Directory every copied file is written into
    #[arg(long = "job_output_path", alias = "job-output-path", global = true)]
    pub job_output_path: Option<PathBuf>,

    /// TOML configuration file (also BATCH_AGENT_CONFIG_PATH)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dotenv file loaded before configuration (default: ./.env)
    #[arg(long = "env_path", alias = "env-path", global = true)]
    pub env_path: Option<PathBuf>,

    /// What a failing entry does to its batch (abort, continue)
    #[arg(long = "failure_policy", alias = "failure-policy", global = true)]
    pub failure_policy: Option<FailurePolicy>,

    /// Copy raw bytes or require UTF-8 text (binary, text)
    #[arg(long = "content_mode", alias = "content-mode", global = true)]
    pub content_mode: Option<ContentMode>,

    /// Log filter directive, e.g. `debug` or `batch_copy_agent=trace`
    #[arg(long = "log_level", alias = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Output format for the final batch report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Subcommands (default: run)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Copy every file in --job_input_path to --job_output_path
    Run,

    /// Copy the given files as one mini-batch
    Batch {
        /// Input files, processed in the order given
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the resolved configuration as JSON
    ShowConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Configuration overrides carried by the parsed flags
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            env_file: self.env_path.clone(),
            input_path: self.job_input_path.clone(),
            output_path: self.job_output_path.clone(),
            failure_policy: self.failure_policy,
            content_mode: self.content_mode,
            log_level: self.log_level.clone(),
        }
    }
}

/// Flags and subcommands the parser understands, with whether each flag takes a value
struct KnownArgs {
    long: HashMap<String, bool>,
    short: HashMap<char, bool>,
    subcommands: HashSet<String>,
}

impl KnownArgs {
    fn collect() -> Self {
        let mut command = Cli::command();
        command.build();

        let mut known = Self {
            long: HashMap::new(),
            short: HashMap::new(),
            subcommands: HashSet::new(),
        };

        for arg in command.get_arguments() {
            let takes_value = arg.get_action().takes_values();
            if let Some(long) = arg.get_long() {
                known.long.insert(long.to_string(), takes_value);
            }
            for alias in arg.get_all_aliases().unwrap_or_default() {
                known.long.insert(alias.to_string(), takes_value);
            }
            if let Some(short) = arg.get_short() {
                known.short.insert(short, takes_value);
            }
        }

        for subcommand in command.get_subcommands() {
            known.subcommands.insert(subcommand.get_name().to_string());
        }

        known
    }

    /// `Some(takes_value)` when the flag token is recognized
    fn lookup(&self, flag: &str) -> Option<bool> {
        if let Some(long) = flag.strip_prefix("--") {
            return self.long.get(long).copied();
        }
        let mut chars = flag.strip_prefix('-')?.chars();
        match (chars.next(), chars.next()) {
            (Some(short), None) => self.short.get(&short).copied(),
            _ => None,
        }
    }
}

/// Split raw arguments into those the parser understands and those it ignores
///
/// Tokens stay `OsString` so non-UTF-8 paths reach the parser untouched; only
/// flag-looking tokens are inspected as text. The program name is always kept.
/// An unrecognized flag also swallows the token after it when that token does
/// not look like a flag or subcommand, so `--foo 0` is dropped as a pair.
pub fn split_known_args(args: Vec<OsString>) -> (Vec<OsString>, Vec<OsString>) {
    let known_args = KnownArgs::collect();
    let mut known = Vec::with_capacity(args.len());
    let mut ignored = Vec::new();

    let mut tokens = args.into_iter();
    if let Some(program) = tokens.next() {
        known.push(program);
    }

    let mut tokens = tokens.peekable();
    while let Some(token) = tokens.next() {
        if token == "--" {
            known.push(token);
            known.extend(tokens.by_ref());
            break;
        }

        let (flag, inline_value) = match token.to_str() {
            Some(text) if text.starts_with('-') && text != "-" => match text.split_once('=') {
                Some((flag, _)) => (flag.to_string(), true),
                None => (text.to_string(), false),
            },
            _ => {
                known.push(token);
                continue;
            }
        };

        match known_args.lookup(&flag) {
            Some(takes_value) => {
                known.push(token);
                if takes_value && !inline_value {
                    if let Some(value) = tokens.next() {
                        known.push(value);
                    }
                }
            }
            None => {
                ignored.push(token);
                if !inline_value {
                    // A positional path right after an unknown flag is taken as
                    // its value; `batch` paths in that spot must follow `--`.
                    let swallow = tokens.peek().is_some_and(|next| {
                        next.to_str().map_or(true, |next| {
                            !next.starts_with('-') && !known_args.subcommands.contains(next)
                        })
                    });
                    if swallow {
                        ignored.extend(tokens.next());
                    }
                }
            }
        }
    }

    (known, ignored)
}
