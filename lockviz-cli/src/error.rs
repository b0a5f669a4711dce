//! CLI-specific error types and exit code mapping

use lockviz_core::error::LockvizError;
use lockviz_log_pipeline::LogPipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// An input file broke structured-log framing.
    #[error("{0}")]
    Decode(String),

    /// The chart could not be produced.
    #[error("render error: {0}")]
    Render(String),

    /// IO error (file open, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                     |
    /// |------|-----------------------------|
    /// | 0    | Success                     |
    /// | 2    | Configuration error         |
    /// | 3    | Malformed input log         |
    /// | 4    | Chart could not be rendered |
    /// | 10   | IO error                    |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Decode(_) => 3,
            Self::Render(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

impl From<LockvizError> for CliError {
    fn from(e: LockvizError) -> Self {
        match e {
            LockvizError::Config(e) => Self::Config(e.to_string()),
            LockvizError::Decode(e) => Self::Decode(e.to_string()),
            LockvizError::Render(e) => Self::Render(e.to_string()),
            LockvizError::Io(e) => Self::Io(e),
        }
    }
}

impl From<LogPipelineError> for CliError {
    fn from(e: LogPipelineError) -> Self {
        // the pipeline message names the offending file
        if matches!(e, LogPipelineError::Decode { .. }) {
            return Self::Decode(e.to_string());
        }
        Self::from(LockvizError::from(e))
    }
}
