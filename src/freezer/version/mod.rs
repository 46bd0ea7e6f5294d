//! Application version handling.
//!
//! - `mod.rs` - reading `__version__` and normalizing to four components
//! - `template` - PyInstaller version-file template
//! - `resource` - Windows version resource record and writer

mod resource;
mod template;

pub use resource::{VersionResource, write_version_info};

use super::error::{Error, ErrorExt, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Matches `__version__ = '...'` or `__version__ = "..."` at line start.
static VERSION_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^__version__\s*=\s*(?:'([^'\n]*)'|"([^"\n]*)")"#)
        .expect("version pattern is valid")
});

/// Reads `__version__` from a Python module.
pub fn read_version(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).fs_context("reading version file", path)?;
    parse_version_assignment(&contents).ok_or_else(|| Error::VersionFile {
        path: path.to_path_buf(),
        reason: "no __version__ assignment found".to_string(),
    })
}

fn parse_version_assignment(contents: &str) -> Option<String> {
    let captures = VERSION_ASSIGNMENT.captures(contents)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str().trim().to_string())
        .filter(|version| !version.is_empty())
}

/// Normalizes a dotted version to exactly four components.
///
/// Missing trailing components are zero and components past the fourth are
/// dropped. Every component, including dropped ones, must be a decimal
/// integer. Values are kept as
/// written; PyInstaller masks them to 16 bits when packing the fixed file
/// info.
/// - "2023.03.04" -> [2023, 3, 4, 0]
/// - "2023.11.16.232502" -> [2023, 11, 16, 232502]
/// - "1" -> [1, 0, 0, 0]
pub fn version_to_list(version: &str) -> Result<[u64; 4]> {
    let invalid = |reason: String| Error::InvalidVersion {
        version: version.to_string(),
        reason,
    };

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() > 4 {
        log::debug!(
            "Version {} has {} components, only the first 4 are used",
            version,
            parts.len()
        );
    }

    let mut list = [0u64; 4];
    for (index, part) in parts.iter().enumerate() {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("'{part}' is not a number")));
        }
        let value = part
            .parse()
            .map_err(|_| invalid(format!("'{part}' is too large")))?;
        if let Some(slot) = list.get_mut(index) {
            *slot = value;
        }
    }

    Ok(list)
}
