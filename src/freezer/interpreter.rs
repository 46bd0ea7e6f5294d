//! Python interpreter discovery and execution.
//!
//! Locates the interpreter that runs the packaging tool, probes it for the
//! host identity and optional modules, and runs modules with `-m`.

use super::error::{Error, Result};
use super::host::{HostInfo, ProbeOutput};
use crate::bail;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Environment variable that overrides interpreter discovery.
pub const PYTHON_ENV: &str = "PYINST_PYTHON";

/// Interpreter names tried on `PATH`, in order.
const CANDIDATES: [&str; 2] = ["python3", "python"];

/// Prints the host identity as a single JSON object.
const HOST_PROBE: &str = "import json, platform, sys; print(json.dumps({\
'platform': sys.platform, \
'machine': platform.machine(), \
'architecture': platform.architecture()[0], \
'python_version': platform.python_version()}))";

/// A Python interpreter on disk.
#[derive(Clone, Debug)]
pub struct Interpreter {
    path: PathBuf,
}

impl Interpreter {
    /// Wraps an explicit interpreter path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Finds an interpreter: explicit path first, then `python3`/`python` on `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let resolved = which::which(path).map_err(|e| {
                Error::InterpreterNotFound(format!("{}: {}", path.display(), e))
            })?;
            log::debug!("Using interpreter {}", resolved.display());
            return Ok(Self::new(resolved));
        }

        for candidate in CANDIDATES {
            match which::which(candidate) {
                Ok(path) => {
                    log::debug!("Found {} at: {}", candidate, path.display());
                    return Ok(Self::new(path));
                }
                Err(e) => log::debug!("{} not found in PATH: {}", candidate, e),
            }
        }

        Err(Error::InterpreterNotFound(format!(
            "none of {} found in PATH. Set {} or pass --python",
            CANDIDATES.join(", "),
            PYTHON_ENV
        )))
    }

    /// Path to the interpreter executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queries platform, machine, bitness and version.
    pub async fn probe_host(&self) -> Result<HostInfo> {
        let output = Command::new(&self.path)
            .args(["-c", HOST_PROBE])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: format!("{} -c <host probe>", self.path.display()),
                error,
            })?;

        if !output.status.success() {
            return Err(Error::ProbeFailed(format!(
                "{} exited with {:?}: {}",
                self.path.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| Error::ProbeFailed("interpreter printed nothing".into()))?;
        let probe: ProbeOutput = serde_json::from_str(line.trim())?;
        let host = HostInfo::from(probe);
        if !matches!(host.bits.as_str(), "32" | "64") {
            bail!(
                "{} reported an unsupported architecture width '{}'",
                self.path.display(),
                host.bits
            );
        }
        log::info!(
            "Interpreter {} reports {} {} ({}bit, Python {})",
            self.path.display(),
            host.platform,
            host.machine,
            host.bits,
            host.python_version
        );
        Ok(host)
    }

    /// Whether `import {module}` succeeds.
    ///
    /// An interpreter that cannot be launched counts as "not importable".
    pub async fn can_import(&self, module: &str) -> bool {
        let status = Command::new(&self.path)
            .args(["-c", &format!("import {module}")])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => {
                log::debug!("import {} -> {:?}", module, status.code());
                status.success()
            }
            Err(e) => {
                log::warn!(
                    "Failed to run {} while probing for {}: {}",
                    self.path.display(),
                    module,
                    e
                );
                false
            }
        }
    }

    /// Runs `python -m {module} {args}` in `cwd` with inherited stdio.
    pub async fn run_module(&self, module: &str, args: &[String], cwd: &Path) -> Result<ExitStatus> {
        log::debug!(
            "Running {} -m {} {}",
            self.path.display(),
            module,
            args.join(" ")
        );

        Command::new(&self.path)
            .arg("-m")
            .arg(module)
            .args(args)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: format!("{} -m {}", self.path.display(), module),
                error,
            })
    }
}
