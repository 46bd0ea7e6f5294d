//! Error types for the command line layer.
//!
//! Wraps freezer errors together with configuration and argument failures,
//! and maps them to process exit codes.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, FreezeError>;

/// Main error type for all pyinst operations
#[derive(Error, Debug)]
pub enum FreezeError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Freezer errors
    #[error("{0}")]
    Freezer(#[from] crate::freezer::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl FreezeError {
    /// Process exit code for this error.
    ///
    /// A failing packaging tool propagates its own exit code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Freezer(crate::freezer::Error::ToolFailed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Actionable hints for this error, if any.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::freezer::Error as E;
        match self {
            Self::Freezer(E::ArchMismatch { host, .. }) => vec![format!(
                "Drop the leading bitness argument, or run with a {}bit interpreter via --python",
                if host == "64" { "32" } else { "64" }
            )],
            Self::Freezer(E::InterpreterNotFound(_)) => vec![format!(
                "Install Python 3 or set {} to the interpreter path",
                crate::freezer::interpreter::PYTHON_ENV
            )],
            Self::Freezer(E::ToolFailed { .. }) => vec![
                "Check that PyInstaller is installed: python -m pip install pyinstaller".to_string(),
            ],
            Self::Toml(_) => vec![format!(
                "Check {} for typos; unknown keys are rejected",
                crate::config::CONFIG_FILE_NAME
            )],
            _ => Vec::new(),
        }
    }
}
