//! Command line interface for pyinst.
//!
//! Parses arguments, loads the project configuration, plans the freeze and
//! reports progress while PyInstaller runs.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::config::ProjectConfig;
use crate::error::{CliError, Result};
use crate::freezer::{FreezePlan, Freezer, Interpreter};
use anyhow::Context;
use path_absolutize::Absolutize;

/// Main CLI entry point. Returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from(&args);

    match execute(&args, &runtime).await {
        Ok(()) => Ok(0),
        Err(e) => {
            runtime.error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                runtime.indent(&suggestion);
            }
            Ok(e.exit_code())
        }
    }
}

/// Runs one freeze with already-parsed arguments.
pub async fn execute(args: &Args, runtime: &RuntimeConfig) -> Result<()> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let project_dir = args
        .project_dir
        .absolutize()
        .with_context(|| format!("resolving {}", args.project_dir.display()))?
        .to_path_buf();

    let config = ProjectConfig::load(args.config.as_deref(), &project_dir)?;
    let interpreter = Interpreter::locate(args.python.as_deref())?;
    runtime.verbose(&format!("Using interpreter {}", interpreter.path().display()));

    let freezer = Freezer::new(interpreter, config, &project_dir).await?;
    let plan = freezer.plan(args.pyinstaller_args.clone()).await?;
    report_plan(&freezer, &plan, runtime);

    if args.dry_run {
        runtime.success("Dry run: PyInstaller was not invoked");
        return Ok(());
    }

    let Some(artifact) = freezer.execute(&plan, args.skip_version_info).await? else {
        runtime.warn(&format!(
            "PyInstaller succeeded but {} was not found; skipped version info and verification",
            plan.target.display_path()
        ));
        return Ok(());
    };
    runtime.success(&format!(
        "Built {} ({}, {} bytes)",
        plan.target.display_path(),
        artifact.format,
        artifact.size
    ));
    runtime.indent(&format!("SHA256: {}", artifact.checksum));

    Ok(())
}

fn report_plan(freezer: &Freezer, plan: &FreezePlan, runtime: &RuntimeConfig) {
    let host = freezer.host();
    runtime.section(&format!(
        "Building {} v{} for {} {} with options {:?}",
        freezer.config().package.name,
        plan.version,
        host.platform,
        host.machine,
        plan.options.as_slice()
    ));
    runtime.indent("Remember to update the version using  \"devscripts/update-version.py\"");

    for advisory in &plan.missing_advisories {
        runtime.warn(&advisory.message);
    }
    if let Some(warning) = plan.crypto.fallback_warning() {
        runtime.warn(warning);
    }

    runtime.indent(&format!("Destination: {}", plan.target.display_path()));
    runtime.progress(&format!("Running PyInstaller with {:?}", plan.args));
}
