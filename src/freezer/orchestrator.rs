//! Freeze orchestration.
//!
//! [`Freezer::plan`] performs every decision (bitness check, layout default,
//! target naming, dependency probing, argument assembly) without side
//! effects; [`Freezer::execute`] runs PyInstaller, writes the version
//! resource and verifies the result when it is where the plan expects it.

use super::{
    artifact::{self, FrozenArtifact},
    dependencies::{CryptoModule, dependency_options},
    error::Result,
    host::HostInfo,
    interpreter::Interpreter,
    options::BuildOptions,
    pyinstaller::{pyinstaller_args, run_pyinstaller},
    target::Target,
    version::{self, VersionResource},
};
use crate::config::{Advisory, ProjectConfig};
use std::path::PathBuf;

/// Everything decided before PyInstaller runs.
#[derive(Clone, Debug)]
pub struct FreezePlan {
    /// Application version from the version file
    pub version: String,
    /// User options after legacy-argument handling and defaulting
    pub options: BuildOptions,
    /// Output name and destination
    pub target: Target,
    /// Crypto module chosen for the hidden imports
    pub crypto: CryptoModule,
    /// Advisory files that are missing
    pub missing_advisories: Vec<Advisory>,
    /// Complete PyInstaller argument list
    pub args: Vec<String>,
}

/// Freezes one application with one interpreter.
#[derive(Debug)]
pub struct Freezer {
    interpreter: Interpreter,
    host: HostInfo,
    config: ProjectConfig,
    project_dir: PathBuf,
}

impl Freezer {
    /// Creates a freezer, probing `interpreter` for the host identity.
    pub async fn new(
        interpreter: Interpreter,
        config: ProjectConfig,
        project_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let host = interpreter.probe_host().await?;
        Ok(Self::with_host(interpreter, host, config, project_dir))
    }

    /// Creates a freezer with a known host identity.
    pub fn with_host(
        interpreter: Interpreter,
        host: HostInfo,
        config: ProjectConfig,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            interpreter,
            host,
            config,
            project_dir: project_dir.into(),
        }
    }

    /// Host identity reported by the interpreter.
    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    /// Project configuration in effect.
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Decides how to build from the raw pass-through arguments.
    pub async fn plan(&self, raw_options: Vec<String>) -> Result<FreezePlan> {
        let options = BuildOptions::parse(raw_options, &self.host.bits)?;
        let version = version::read_version(&self.project_dir.join(self.config.version_file()))?;
        let target = Target::resolve(&self.config.package.name, &self.host, options.onedir());

        let missing_advisories = self
            .config
            .advisories()
            .into_iter()
            .filter(|advisory| !self.project_dir.join(&advisory.path).is_file())
            .collect();

        let crypto = CryptoModule::probe(&self.interpreter).await;
        let args = pyinstaller_args(
            &target,
            &self.config.package,
            dependency_options(crypto, &self.config.dependencies),
            options.as_slice(),
        );

        Ok(FreezePlan {
            version,
            options,
            target,
            crypto,
            missing_advisories,
            args,
        })
    }

    /// Runs the plan. The version resource is written unless `skip_version_info`.
    ///
    /// Returns `None` when PyInstaller succeeded but the executable is not at
    /// the planned destination, which happens when forwarded options such as
    /// `--name` or `--distpath` redirect the output.
    pub async fn execute(
        &self,
        plan: &FreezePlan,
        skip_version_info: bool,
    ) -> Result<Option<FrozenArtifact>> {
        // Validate the version before spending minutes in PyInstaller.
        let resource = if self.host.is_windows() && !skip_version_info {
            Some(VersionResource::new(
                &self.config.package.name,
                &plan.version,
                &self.host,
                &self.config.version_info,
            )?)
        } else {
            None
        };

        run_pyinstaller(&self.interpreter, &plan.args, &self.project_dir).await?;

        let exe = self.project_dir.join(&plan.target.path);
        if !exe.is_file() {
            log::warn!("{} not found after PyInstaller succeeded", exe.display());
            return Ok(None);
        }

        if let Some(resource) = resource {
            version::write_version_info(
                &self.interpreter,
                &self.host,
                &exe,
                &resource,
                &self.project_dir,
            )
            .await?;
        }

        let Some(artifact) = artifact::verify(&self.project_dir, &plan.target).await? else {
            return Ok(None);
        };
        log::info!(
            "Built {} ({}, {} bytes, sha256 {})",
            artifact.executable.display(),
            artifact.format,
            artifact.size,
            artifact.checksum
        );
        Ok(Some(artifact))
    }
}
