//! Pass-through option handling.
//!
//! Strips the legacy leading bitness argument and applies the output-layout
//! default before options are forwarded to PyInstaller.

use super::error::{Error, Result};

const ONEDIR_FLAGS: [&str; 2] = ["-D", "--onedir"];
const ONEFILE_FLAGS: [&str; 2] = ["-F", "--onefile"];

/// Options forwarded to the packaging tool, after defaulting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildOptions {
    opts: Vec<String>,
    onedir: bool,
}

impl BuildOptions {
    /// Parses raw pass-through arguments for a host of the given bitness.
    ///
    /// A leading `32` or `64` is the legacy bitness argument and must match
    /// `host_bits`. Without an explicit layout flag, `--onefile` is appended.
    pub fn parse(raw: Vec<String>, host_bits: &str) -> Result<Self> {
        let mut opts = strip_legacy_bitness(raw, host_bits)?;

        let onedir = has_any(&opts, &ONEDIR_FLAGS);
        if !onedir && !has_any(&opts, &ONEFILE_FLAGS) {
            opts.push("--onefile".to_string());
        }

        Ok(Self { opts, onedir })
    }

    /// Whether a one-directory build was requested.
    pub fn onedir(&self) -> bool {
        self.onedir
    }

    /// The options in order.
    pub fn as_slice(&self) -> &[String] {
        &self.opts
    }
}

/// Removes a leading `32`/`64` argument after checking it against the host.
pub fn strip_legacy_bitness(mut raw: Vec<String>, host_bits: &str) -> Result<Vec<String>> {
    let requested = match raw.first().map(String::as_str) {
        Some(bits @ ("32" | "64")) => bits.to_string(),
        _ => return Ok(raw),
    };

    if requested != host_bits {
        return Err(Error::ArchMismatch {
            requested,
            host: host_bits.to_string(),
        });
    }

    raw.remove(0);
    Ok(raw)
}

fn has_any(opts: &[String], flags: &[&str]) -> bool {
    opts.iter().any(|opt| flags.contains(&opt.as_str()))
}
