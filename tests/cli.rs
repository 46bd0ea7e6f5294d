//! End-to-end tests of the `pyinst` binary against a stand-in interpreter.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_PYTHON: &str = include_str!("fixtures/fake_python.sh");

/// A throwaway project with a version file and an executable fake interpreter.
struct Project {
    dir: TempDir,
    python: PathBuf,
    log: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        std::fs::create_dir_all(root.join("yt_dlp")).unwrap();
        std::fs::write(
            root.join("yt_dlp/version.py"),
            "# Autogenerated by devscripts/update-version.py\n\n__version__ = '2023.03.04'\n",
        )
        .unwrap();
        std::fs::write(root.join("main.py"), "print('hello')\n").unwrap();

        let python = root.join("fake_python.sh");
        std::fs::write(&python, FAKE_PYTHON).unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        let log = root.join("invocations.log");
        Self { dir, python, log }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("pyinst").unwrap();
        cmd.current_dir(self.root())
            .env_remove("PYINST_PYTHON")
            .env("FAKE_LOG", &self.log)
            .arg("--python")
            .arg(&self.python);
        cmd
    }

    fn invocations(&self) -> String {
        std::fs::read_to_string(&self.log).unwrap_or_default()
    }
}

#[test]
fn dry_run_prints_plan_without_running_pyinstaller() {
    let project = Project::new();

    project
        .command()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Building db_polluteur v2023.03.04 for linux x86_64 with options [\"--onefile\"]",
        ))
        .stdout(predicate::str::contains("Destination: dist/db_polluteur_linux"))
        .stdout(predicate::str::contains("\"--hidden-import=Cryptodome\""))
        .stdout(predicate::str::contains("\"--exclude-module=devscripts\""))
        .stdout(predicate::str::contains("Dry run"))
        .stderr(predicate::str::contains("Building without lazy_extractors"));

    assert!(!project.invocations().contains("PyInstaller"));
    assert!(!project.root().join("dist").exists());
}

#[test]
fn onedir_build_produces_directory_layout() {
    let project = Project::new();

    project
        .command()
        .args(["64", "--onedir"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Destination: dist/db_polluteur_linux/db_polluteur_linux",
        ))
        .stdout(predicate::str::contains("SHA256: "));

    assert!(
        project
            .root()
            .join("dist/db_polluteur_linux/db_polluteur_linux")
            .is_file()
    );

    let log = project.invocations();
    assert!(log.starts_with("PyInstaller --name=db_polluteur_linux --icon=devscripts/logo.ico"));
    assert!(log.contains("--onedir main.py"));
    assert!(!log.contains("--onefile"));
    assert!(!log.contains("set_version"));
}

#[test]
fn mismatched_bitness_aborts() {
    let project = Project::new();

    project
        .command()
        .args(["32", "--clean"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "32bit executable cannot be built on a 64bit system",
        ));

    assert!(project.invocations().is_empty());
}

#[test]
fn crypto_fallback_warns() {
    let project = Project::new();

    project
        .command()
        .env("FAKE_MODULES", "Crypto mutagen")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"--hidden-import=Crypto\""))
        .stderr(predicate::str::contains(
            "Using Crypto since Cryptodome is not available",
        ));
}

#[test]
fn pyinstaller_exit_code_is_propagated() {
    let project = Project::new();

    project
        .command()
        .env("FAKE_PYINSTALLER_EXIT", "3")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("PyInstaller exited with exit code 3"));
}

#[test]
fn windows_build_writes_version_resource() {
    let project = Project::new();
    let version_copy = project.root().join("version_copy.txt");

    project
        .command()
        .env("FAKE_PLATFORM", "win32")
        .env("FAKE_MACHINE", "AMD64")
        .env("FAKE_ARCH", "32bit")
        .env("FAKE_VERSION_COPY", &version_copy)
        .args(["32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Destination: dist/db_polluteur_x86.exe"));

    assert!(project.root().join("dist/db_polluteur_x86.exe").is_file());

    let log = project.invocations();
    assert!(log.contains("PyInstaller.utils.cliutils.set_version "));
    assert!(log.trim_end().ends_with("db_polluteur_x86.exe"));

    let version_file = std::fs::read_to_string(&version_copy).unwrap();
    assert!(version_file.contains("filevers=(2023, 3, 4, 0)"));
    assert!(version_file.contains("StringStruct('OriginalFilename', 'db_polluteur_x86.exe')"));
    assert!(version_file.contains(
        "StringStruct('ProductVersion', '2023.03.04_x86 on Python 3.11.9')"
    ));
}

#[test]
fn skip_version_info_leaves_binary_alone() {
    let project = Project::new();

    project
        .command()
        .env("FAKE_PLATFORM", "win32")
        .env("FAKE_MACHINE", "AMD64")
        .arg("--skip-version-info")
        .assert()
        .success();

    assert!(project.root().join("dist/db_polluteur.exe").is_file());
    assert!(!project.invocations().contains("set_version"));
}

#[test]
fn config_file_renames_product() {
    let project = Project::new();
    std::fs::create_dir_all(project.root().join("tool")).unwrap();
    std::fs::write(project.root().join("tool/version.py"), "__version__ = \"1.4\"\n").unwrap();
    std::fs::write(
        project.root().join("pyinst.toml"),
        r#"
advisories = []

[package]
name = "tool"
module = "tool"
entry_point = "tool/__main__.py"

[dependencies]
hidden_imports = []
collect_submodules = []
exclude_modules = ["tests"]
"#,
    )
    .unwrap();

    project
        .command()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Building tool v1.4 for linux"))
        .stdout(predicate::str::contains("Destination: dist/tool_linux"))
        .stdout(predicate::str::contains("\"tool/__main__.py\""))
        .stderr(predicate::str::contains("lazy_extractors").not());
}

#[test]
fn missing_version_file_fails() {
    let project = Project::new();
    std::fs::remove_file(project.root().join("yt_dlp/version.py")).unwrap();

    project
        .command()
        .arg("--dry-run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("version.py"));
}

#[test]
fn forwarded_name_still_succeeds() {
    let project = Project::new();

    project
        .command()
        .arg("--name=custom")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "dist/db_polluteur_linux was not found",
        ));

    assert!(project.root().join("dist/custom").is_file());
    assert!(project.invocations().contains("--name=custom"));
}

#[test]
fn nightly_version_builds_on_windows() {
    let project = Project::new();
    let version_copy = project.root().join("version_copy.txt");
    std::fs::write(
        project.root().join("yt_dlp/version.py"),
        "__version__ = '2023.11.16.232502'\n",
    )
    .unwrap();

    project
        .command()
        .env("FAKE_PLATFORM", "win32")
        .env("FAKE_MACHINE", "AMD64")
        .env("FAKE_VERSION_COPY", &version_copy)
        .assert()
        .success();

    let version_file = std::fs::read_to_string(&version_copy).unwrap();
    assert!(version_file.contains("filevers=(2023, 11, 16, 232502)"));
}

#[test]
fn verbose_reports_interpreter() {
    let project = Project::new();

    project
        .command()
        .args(["--verbose", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using interpreter"));

    project
        .command()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using interpreter").not());
}
