//! Verification of the frozen executable.
//!
//! After PyInstaller exits successfully the executable's object format is
//! identified and its SHA-256 computed so the build log records exactly what
//! was produced.

use super::error::{ErrorExt, Result};
use super::target::Target;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Object format of an executable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryFormat {
    /// Windows Portable Executable
    Pe,
    /// ELF (Linux, BSD)
    Elf,
    /// Mach-O, thin or fat
    MachO,
    /// Anything goblin does not recognize
    Unknown,
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pe => "PE",
            Self::Elf => "ELF",
            Self::MachO => "Mach-O",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Verified build output.
#[derive(Clone, Debug)]
pub struct FrozenArtifact {
    /// The executable
    pub executable: PathBuf,
    /// File (onefile) or directory (onedir) PyInstaller produced
    pub root: PathBuf,
    /// Object format of the executable
    pub format: BinaryFormat,
    /// Total size of `root` in bytes
    pub size: u64,
    /// Hex SHA-256 of `root`
    pub checksum: String,
}

/// Checks the build output of `target` under `project_dir`.
///
/// Returns `None` if the executable is not at the planned path.
pub async fn verify(project_dir: &Path, target: &Target) -> Result<Option<FrozenArtifact>> {
    let executable = project_dir.join(&target.path);
    let root = project_dir.join(target.artifact_root());

    if !executable.is_file() {
        return Ok(None);
    }

    let bytes = tokio::fs::read(&executable)
        .await
        .fs_context("reading frozen executable", &executable)?;
    let format = detect_format(&bytes);
    log::debug!("{} is {}", executable.display(), format);

    let (checksum, size) = if root.is_dir() {
        directory_sha256(&root).await?
    } else {
        (hex::encode(Sha256::digest(&bytes)), bytes.len() as u64)
    };

    Ok(Some(FrozenArtifact {
        executable,
        root,
        format,
        size,
        checksum,
    }))
}

/// Identifies the object format of an executable image.
pub fn detect_format(bytes: &[u8]) -> BinaryFormat {
    match goblin::Object::parse(bytes) {
        Ok(goblin::Object::PE(_)) => BinaryFormat::Pe,
        Ok(goblin::Object::Elf(_)) => BinaryFormat::Elf,
        Ok(goblin::Object::Mach(_)) => BinaryFormat::MachO,
        Ok(_) => BinaryFormat::Unknown,
        Err(e) => {
            log::debug!("Not a recognized executable: {}", e);
            BinaryFormat::Unknown
        }
    }
}

/// Hashes a directory tree: relative path then content of each file, in
/// sorted path order. Returns the hex digest and the total file size.
async fn directory_sha256(dir: &Path) -> Result<(String, u64)> {
    let mut entries: Vec<_> = walkdir::WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();
    entries.sort_by_key(|e| e.path().to_path_buf());

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    for entry in entries {
        if let Ok(rel_path) = entry.path().strip_prefix(dir) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        let mut file = tokio::fs::File::open(entry.path())
            .await
            .fs_context("opening file for hashing", entry.path())?;
        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hashing", entry.path())?;
            if n == 0 {
                break;
            }
            size += n as u64;
            hasher.update(&buffer[..n]);
        }
    }

    Ok((hex::encode(hasher.finalize()), size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freezer::host::HostInfo;

    fn linux_target(onedir: bool) -> Target {
        let host = HostInfo::new("linux", "x86_64", "64bit", "3.11.0");
        Target::resolve("app", &host, onedir)
    }

    #[test]
    fn recognizes_formats_by_magic() {
        assert_eq!(detect_format(b"not an executable at all"), BinaryFormat::Unknown);
        assert_eq!(detect_format(b""), BinaryFormat::Unknown);
        assert_eq!(BinaryFormat::MachO.to_string(), "Mach-O");
    }

    #[tokio::test]
    async fn missing_onefile_output_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(verify(dir.path(), &linux_target(false)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn onefile_checksum_matches_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = linux_target(false);
        let exe = dir.path().join(&target.path);
        std::fs::create_dir_all(exe.parent().unwrap()).unwrap();
        std::fs::write(&exe, b"hello").unwrap();

        let artifact = verify(dir.path(), &target).await.unwrap().unwrap();
        assert_eq!(artifact.size, 5);
        assert_eq!(
            artifact.checksum,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(artifact.format, BinaryFormat::Unknown);
    }

    #[tokio::test]
    async fn onedir_checksum_covers_tree() {
        let dir = tempfile::tempdir().unwrap();
        let target = linux_target(true);
        let exe = dir.path().join(&target.path);
        std::fs::create_dir_all(exe.parent().unwrap()).unwrap();
        std::fs::write(&exe, b"main").unwrap();
        std::fs::create_dir_all(exe.parent().unwrap().join("_internal")).unwrap();
        std::fs::write(exe.parent().unwrap().join("_internal/lib.so"), b"library").unwrap();

        let first = verify(dir.path(), &target).await.unwrap().unwrap();
        assert_eq!(first.size, 11);
        assert_eq!(first.root, dir.path().join("dist/app_linux"));

        std::fs::write(exe.parent().unwrap().join("_internal/lib.so"), b"changed").unwrap();
        let second = verify(dir.path(), &target).await.unwrap().unwrap();
        assert_ne!(first.checksum, second.checksum);
    }
}
