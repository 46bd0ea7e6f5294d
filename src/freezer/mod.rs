//! Freezing Python applications with PyInstaller.
//!
//! # Module Organization
//!
//! - [`error`] - error type, context extensions and `bail!`
//! - [`host`] - host identity reported by the interpreter
//! - [`interpreter`] - interpreter discovery and subprocess execution
//! - [`options`] - legacy bitness argument and layout defaulting
//! - [`target`] - output name and destination
//! - [`dependencies`] - hidden-import, collection and exclusion flags
//! - [`version`] - version file parsing and the Windows version resource
//! - [`pyinstaller`] - PyInstaller argument assembly and execution
//! - [`artifact`] - build output verification
//! - [`orchestrator`] - the [`Freezer`] tying the steps together

pub mod artifact;
pub mod dependencies;
pub mod error;
pub mod host;
pub mod interpreter;
pub mod options;
pub mod orchestrator;
pub mod pyinstaller;
pub mod target;
pub mod version;

pub use artifact::{BinaryFormat, FrozenArtifact};
pub use dependencies::CryptoModule;
pub use error::{Error, Result};
pub use host::HostInfo;
pub use interpreter::Interpreter;
pub use options::BuildOptions;
pub use orchestrator::{FreezePlan, Freezer};
pub use target::Target;
