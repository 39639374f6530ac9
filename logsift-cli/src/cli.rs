//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// logsift -- server log analysis: severity filter, login correlation, anomaly detection.
///
/// Use `logsift <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logsift", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logsift.toml configuration file.
    ///
    /// When omitted, `logsift.toml` in the working directory is used if present,
    /// otherwise built-in defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a log file.
    Analyze(AnalyzeArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- analyze ----

/// Parse a log file and print the analysis results.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Log file to analyze. Nothing is analyzed when omitted.
    pub path: Option<PathBuf>,

    /// Result set to print.
    #[arg(long, value_enum, default_value = "all")]
    pub view: View,

    /// Severity term (repeatable). Replaces the configured vocabulary.
    #[arg(long = "severity", value_name = "TERM")]
    pub severity: Vec<String>,

    /// Number of clusters for anomaly detection.
    #[arg(long, value_name = "N")]
    pub clusters: Option<usize>,

    /// Seed for cluster initialisation.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

/// Result set selection for `analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Summary plus every result set.
    All,
    /// Events matching the severity vocabulary.
    Filtered,
    /// Events in login-anchored correlation groups.
    Correlated,
    /// Events in minority time clusters.
    Anomalies,
    /// Event counts per hour.
    Hourly,
    /// Event counts per source.
    Sources,
}

// ---- config ----

/// Manage logsift configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, analysis).
        #[arg(long)]
        section: Option<String>,
    },
}
