//! CLI-specific error types and exit code mapping

use logsift_core::error::LogsiftError;
use logsift_log_analyzer::AnalyzerError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// `analyze` was run without a log file.
    #[error("no log file selected")]
    NoInputSelected,

    /// The log file is missing, unreadable or not UTF-8.
    #[error("cannot read log file {path}: {reason}")]
    FileNotReadable { path: String, reason: String },

    /// Analysis failed after the file was read.
    #[error("analysis error: {0}")]
    Analysis(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logsift-core.
    #[error("{0}")]
    Core(#[from] LogsiftError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success, or no input file selected       |
    /// | 1    | Processing failure                       |
    /// | 2    | Configuration error                      |
    /// | 3    | Input file not readable                  |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoInputSelected => 0,
            Self::Config(_) | Self::Core(LogsiftError::Config(_)) => 2,
            Self::FileNotReadable { .. } => 3,
            Self::Command(_)
            | Self::Analysis(_)
            | Self::JsonSerialize(_)
            | Self::Io(_)
            | Self::Core(_) => 1,
        }
    }
}

impl From<AnalyzerError> for CliError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::FileNotReadable { path, reason } => {
                Self::FileNotReadable { path, reason }
            }
            config @ AnalyzerError::Config { .. } => Self::Config(config.to_string()),
            other => Self::Analysis(other.to_string()),
        }
    }
}
