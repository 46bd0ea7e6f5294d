//! Command line argument parsing.
//!
//! Wrapper options come first; the first token clap does not recognize starts
//! the pass-through arguments, which are forwarded to PyInstaller verbatim.

use clap::Parser;
use std::path::PathBuf;

/// Freeze a Python application into a standalone executable
#[derive(Parser, Debug)]
#[command(
    name = "pyinst",
    version,
    about = "Freeze a Python application into a standalone executable with PyInstaller",
    long_about = "Runs PyInstaller with platform-specific naming, explicit dependency lists and,
on Windows, an embedded version resource.

Usage:
  pyinst
  pyinst 64 --onedir
  pyinst --python /opt/py32/python.exe 32 --clean

The output lands in dist/, named after the product, OS and machine
(e.g. dist/db_polluteur_macos_arm64). A leading 32 or 64 must match the
interpreter's bitness. Without -D/--onedir or -F/--onefile, --onefile is used.

Wrapper options must precede the PyInstaller options."
)]
pub struct Args {
    /// Project configuration file [default: <project-dir>/pyinst.toml if present]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Python interpreter that runs PyInstaller [default: python3, then python]
    #[arg(long, value_name = "PATH", env = "PYINST_PYTHON")]
    pub python: Option<PathBuf>,

    /// Directory PyInstaller runs in
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Print the PyInstaller command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Do not write the Windows version resource
    #[arg(long)]
    pub skip_version_info: bool,

    /// Print interpreter and diagnostic details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(long)]
    pub quiet: bool,

    /// Optional legacy bitness (32 or 64), then options forwarded to PyInstaller
    #[arg(
        value_name = "PYINSTALLER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub pyinstaller_args: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.project_dir.is_dir() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.project_dir.display()
            ));
        }

        if let Some(config) = &self.config {
            if !config.is_file() {
                return Err(format!("Config file not found: {}", config.display()));
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print progress message
    pub fn progress(&self, message: &str) {
        let _ = self.output.progress(message);
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print warning message
    pub fn warn(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        let _ = self.output.error(message);
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        let _ = self.output.section(title);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}
