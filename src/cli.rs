//! CLI arguments and subcommands for check-proc.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Output format for process listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "check-proc",
    about = "Monitoring plugin: checks that a process runs detached under init",
    long_about = "Monitoring plugin: checks that a process runs detached under init.\n\n\
                  Scans /proc for a process with the given executable name whose parent is \
                  the init process. Exits 0 (OK) when found, 2 (CRITICAL) when not, and \
                  3 (UNKNOWN) on usage errors or when the process table cannot be read.",
    version = "0.1.0",
    propagate_version = true,
    after_help = "example:\n       check-proc -c \"sshd\""
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Process name (executable name, not a path)
    #[arg(short = 'c', long = "command", value_name = "NAME")]
    pub target: Option<String>,

    /// Required parent pid of the matching process
    #[arg(long)]
    pub parent_pid: Option<u32>,

    /// Mount point of the proc filesystem
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Log level (logs go to stderr)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 3 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Read process status records sequentially
    #[arg(long)]
    pub no_parallel: bool,

    /// Parallel processing threads (0 = auto)
    #[arg(long)]
    pub parallelism: Option<usize>,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the current process table
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only show processes with this executable name
        #[arg(short = 'n', long)]
        name: Option<String>,
    },

    /// Show a single process by pid
    Lookup {
        /// Process id
        pid: u32,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check that the process table is readable
    CheckRequirements,
}
