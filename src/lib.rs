//! PyInstaller packaging helper
//!
//! This library provides the building blocks of the `pyinst` command:
//! - resolving the host identity from the Python interpreter
//! - naming the frozen executable per OS and machine
//! - assembling PyInstaller dependency and layout flags
//! - writing Windows version resources into the built executable
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod freezer;

// Re-export commonly used types
pub use error::{CliError, FreezeError, Result};
