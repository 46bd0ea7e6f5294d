//! PyInstaller command assembly and execution.

use super::error::{Error, Result};
use super::interpreter::Interpreter;
use super::target::Target;
use crate::config::PackageConfig;
use std::path::Path;

/// Module run with `-m` to freeze the application.
pub const PYINSTALLER_MODULE: &str = "PyInstaller";

/// The MSVC runtime breaks when UPX-compressed.
const UPX_EXCLUDE: &str = "vcruntime140.dll";

/// Full PyInstaller argument list.
///
/// Fixed flags first, then dependency flags, then the user's options, then
/// the entry script, so user options can override the fixed ones.
pub fn pyinstaller_args(
    target: &Target,
    package: &PackageConfig,
    dependency_options: impl IntoIterator<Item = String>,
    user_options: &[String],
) -> Vec<String> {
    let mut args = vec![
        format!("--name={}", target.name),
        format!("--icon={}", slashed(&package.icon)),
        format!("--upx-exclude={UPX_EXCLUDE}"),
        "--noconfirm".to_string(),
    ];
    args.extend(dependency_options);
    args.extend(user_options.iter().cloned());
    args.push(slashed(&package.entry_point));
    args
}

/// Runs PyInstaller in `cwd`; a failing exit is returned with its code.
pub async fn run_pyinstaller(interpreter: &Interpreter, args: &[String], cwd: &Path) -> Result<()> {
    log::info!("Running PyInstaller...");

    let status = interpreter.run_module(PYINSTALLER_MODULE, args, cwd).await?;
    if !status.success() {
        return Err(Error::ToolFailed {
            tool: PYINSTALLER_MODULE.to_string(),
            code: status.code(),
        });
    }

    Ok(())
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freezer::host::HostInfo;

    #[test]
    fn argument_order() {
        let host = HostInfo::new("win32", "x86", "32bit", "3.8.10");
        let target = Target::resolve("db_polluteur", &host, false);
        let args = pyinstaller_args(
            &target,
            &PackageConfig::default(),
            vec!["--hidden-import=Cryptodome".to_string()],
            &["--onefile".to_string()],
        );

        assert_eq!(
            args,
            [
                "--name=db_polluteur_x86",
                "--icon=devscripts/logo.ico",
                "--upx-exclude=vcruntime140.dll",
                "--noconfirm",
                "--hidden-import=Cryptodome",
                "--onefile",
                "main.py",
            ]
        );
    }

    #[tokio::test]
    async fn unlaunchable_interpreter_reports_command() {
        let interpreter = Interpreter::new("/nonexistent/python-for-tests");
        let dir = tempfile::tempdir().unwrap();
        let err = run_pyinstaller(&interpreter, &[], dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
