//! Error types for freezing operations.
//!
//! Provides the [`Error`] enum used throughout the freezer, the [`ErrorExt`]
//! extension for attaching path context to IO errors, and the
//! [`bail!`](crate::bail) macro.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for freezer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while freezing an application.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested legacy bitness does not match the interpreter.
    #[error("{requested}bit executable cannot be built on a {host}bit system")]
    ArchMismatch {
        /// Bitness requested on the command line ("32" or "64")
        requested: String,
        /// Bitness of the host interpreter
        host: String,
    },

    /// Version string cannot be represented in a version resource.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion {
        /// The offending version string
        version: String,
        /// What is wrong with it
        reason: String,
    },

    /// Version file missing or without a version assignment.
    #[error("cannot read version from {}: {reason}", .path.display())]
    VersionFile {
        /// Version file that was read
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// No usable Python interpreter.
    #[error("python interpreter not found: {0}")]
    InterpreterNotFound(String),

    /// Interpreter probe produced unexpected output.
    #[error("interpreter probe failed: {0}")]
    ProbeFailed(String),

    /// A child process could not be launched.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that failed to start
        command: String,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// The packaging tool exited unsuccessfully.
    #[error("{tool} exited with {}", describe_exit(.code))]
    ToolFailed {
        /// Tool name
        tool: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Filesystem operation failed.
    #[error("{context} ({}): {error}", .path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// Version template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Plain IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with a description and the path involved.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::freezer::Error::GenericError(format!($($arg)*)))
    };
}
