//! Output name and destination resolution.

use super::host::HostInfo;
use std::path::PathBuf;

/// Directory PyInstaller writes finished builds to.
pub const DIST_DIR: &str = "dist";

/// Name and destination of the frozen executable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    /// Executable base name, e.g. `db_polluteur_macos_arm64`
    pub name: String,
    /// Path relative to the project directory
    pub path: PathBuf,
    /// Whether the build is a one-directory layout
    pub onedir: bool,
}

impl Target {
    /// Resolves the target for `product` on `host`.
    pub fn resolve(product: &str, host: &HostInfo, onedir: bool) -> Self {
        let machine = host.normalized_machine();
        let name = [product, host.os_alias(), machine.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        let mut file_name = name.clone();
        if host.is_windows() {
            file_name.push_str(".exe");
        }

        let mut path = PathBuf::from(DIST_DIR);
        if onedir {
            path.push(&name);
        }
        path.push(file_name);

        Self { name, path, onedir }
    }

    /// The directory (onedir) or file (onefile) PyInstaller produces.
    pub fn artifact_root(&self) -> PathBuf {
        if self.onedir {
            PathBuf::from(DIST_DIR).join(&self.name)
        } else {
            self.path.clone()
        }
    }

    /// Destination with forward slashes, as shown to users.
    pub fn display_path(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
