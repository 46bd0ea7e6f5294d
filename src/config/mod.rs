//! Project configuration from `pyinst.toml`.
//!
//! Every key is optional; an absent file yields the defaults below.

use crate::error::{CliError, FreezeError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "pyinst.toml";

/// Complete project configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// `[package]` section
    pub package: PackageConfig,

    /// `[dependencies]` section
    pub dependencies: DependencyConfig,

    /// `[version_info]` section
    pub version_info: VersionInfoConfig,

    /// `[[advisories]]` entries; defaults apply only when the key is absent
    pub advisories: Option<Vec<Advisory>>,
}

/// Application identity and layout.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Product name used for the executable and version resource.
    pub name: String,

    /// Python package directory of the application.
    pub module: String,

    /// Script handed to PyInstaller.
    pub entry_point: PathBuf,

    /// Executable icon.
    pub icon: PathBuf,

    /// Module holding `__version__`.
    ///
    /// Default: `{module}/version.py`
    pub version_file: Option<PathBuf>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: "db_polluteur".to_string(),
            module: "yt_dlp".to_string(),
            entry_point: PathBuf::from("main.py"),
            icon: PathBuf::from("devscripts/logo.ico"),
            version_file: None,
        }
    }
}

/// Modules PyInstaller must include or leave out.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependencyConfig {
    /// Hidden imports after the crypto module.
    pub hidden_imports: Vec<String>,

    /// Packages whose submodules are all collected.
    pub collect_submodules: Vec<String>,

    /// Modules excluded from analysis.
    pub exclude_modules: Vec<String>,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            hidden_imports: strings(&["mutagen", "brotli", "certifi", "websockets"]),
            collect_submodules: strings(&["websockets"]),
            exclude_modules: strings(&[
                "youtube_dl",
                "youtube_dlc",
                "test",
                "ytdlp_plugins",
                "devscripts",
            ]),
        }
    }
}

/// Fixed strings of the Windows version resource.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionInfoConfig {
    /// `CompanyName`
    pub company: String,

    /// `LegalCopyright`
    pub copyright: String,
}

impl Default for VersionInfoConfig {
    fn default() -> Self {
        Self {
            company: "https://github.com/db_polluteur".to_string(),
            copyright: "pukkandan.ytdlp@gmail.com | UNLICENSE".to_string(),
        }
    }
}

/// A file whose absence deserves a warning before building.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Advisory {
    /// Path relative to the project directory
    pub path: PathBuf,
    /// Warning printed when the path does not exist
    pub message: String,
}

impl ProjectConfig {
    /// Loads `path` if given, else `pyinst.toml` in `project_dir` if present,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = project_dir.join(CONFIG_FILE_NAME);
                if !candidate.exists() {
                    log::debug!(
                        "No {} in {}, using defaults",
                        CONFIG_FILE_NAME,
                        project_dir.display()
                    );
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            FreezeError::Cli(CliError::ExecutionFailed {
                command: "read_config".to_string(),
                reason: format!("Failed to read {}: {}", path.display(), e),
            })
        })?;

        log::info!("Loaded configuration from {}", path.display());
        Self::from_toml(&contents)
    }

    /// Parses configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Version module path relative to the project directory.
    pub fn version_file(&self) -> PathBuf {
        self.package
            .version_file
            .clone()
            .unwrap_or_else(|| Path::new(&self.package.module).join("version.py"))
    }

    /// Advisories in effect: configured ones, or the lazy-extractor check.
    pub fn advisories(&self) -> Vec<Advisory> {
        match &self.advisories {
            Some(advisories) => advisories.clone(),
            None => vec![Advisory {
                path: Path::new(&self.package.module)
                    .join("extractor")
                    .join("lazy_extractors.py"),
                message: "Building without lazy_extractors. Run  \
                          \"devscripts/make_lazy_extractors.py\"  to build lazy extractors"
                    .to_string(),
            }],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
