//! Host identity as seen by the Python interpreter.
//!
//! The frozen executable inherits the interpreter's platform, machine and
//! pointer width, so these come from the interpreter rather than from the
//! platform this binary was compiled for.

use serde::Deserialize;

/// OS identifier Python reports on Windows (`sys.platform`).
pub const WINDOWS_PLATFORM: &str = "win32";

/// Machine names that denote the x86 family.
const X86_MACHINES: [&str; 5] = ["x86", "x86_64", "amd64", "i386", "i686"];

/// Identity of the interpreter that will be frozen.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostInfo {
    /// `sys.platform`, e.g. "win32", "darwin", "linux"
    pub platform: String,

    /// `platform.machine()` as reported, e.g. "AMD64", "arm64"
    pub machine: String,

    /// Pointer width: "32" or "64"
    pub bits: String,

    /// `platform.python_version()`
    pub python_version: String,
}

impl HostInfo {
    /// Creates host info, deriving bitness from `platform.architecture()[0]`
    /// (e.g. "64bit" -> "64").
    pub fn new(platform: &str, machine: &str, architecture: &str, python_version: &str) -> Self {
        Self {
            platform: platform.to_string(),
            machine: machine.to_string(),
            bits: architecture.chars().take(2).collect(),
            python_version: python_version.to_string(),
        }
    }

    /// Whether the interpreter runs on Windows.
    pub fn is_windows(&self) -> bool {
        self.platform == WINDOWS_PLATFORM
    }

    /// Machine suffix used in file names.
    ///
    /// The x86 family collapses to "x86" on 32-bit hosts and to nothing on
    /// 64-bit hosts; other machines are kept lowercased.
    pub fn normalized_machine(&self) -> String {
        let machine = self.machine.to_lowercase();
        if X86_MACHINES.contains(&machine.as_str()) {
            if self.bits == "32" {
                "x86".to_string()
            } else {
                String::new()
            }
        } else {
            machine
        }
    }

    /// OS component of file names: empty on Windows, "macos" for darwin.
    pub fn os_alias(&self) -> &str {
        match self.platform.as_str() {
            WINDOWS_PLATFORM => "",
            "darwin" => "macos",
            other => other,
        }
    }
}

/// Raw JSON emitted by the interpreter probe.
#[derive(Debug, Deserialize)]
pub(crate) struct ProbeOutput {
    pub platform: String,
    pub machine: String,
    pub architecture: String,
    pub python_version: String,
}

impl From<ProbeOutput> for HostInfo {
    fn from(probe: ProbeOutput) -> Self {
        HostInfo::new(
            &probe.platform,
            &probe.machine,
            &probe.architecture,
            &probe.python_version,
        )
    }
}
