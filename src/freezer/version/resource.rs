//! Windows version resource.
//!
//! Builds the `VS_VERSIONINFO` record for a frozen executable and writes it
//! with PyInstaller's `set_version` utility.

use super::{template::VERSION_INFO_TEMPLATE, version_to_list};
use crate::config::VersionInfoConfig;
use crate::freezer::{
    error::{Error, ErrorExt, Result},
    host::HostInfo,
    interpreter::Interpreter,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Module run with `-m` to patch version info into an executable.
pub const SET_VERSION_MODULE: &str = "PyInstaller.utils.cliutils.set_version";

/// String table entries, in the order they are written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionResource {
    /// Normalized file and product version
    pub version_list: [u64; 4],
    /// Key/value pairs of the `040904B0` string table
    pub strings: Vec<(&'static str, String)>,
}

#[derive(Serialize)]
struct StringEntry {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct TemplateData {
    filevers: String,
    prodvers: String,
    strings: Vec<StringEntry>,
}

impl VersionResource {
    /// Builds the record for `product` at `version` on `host`.
    pub fn new(
        product: &str,
        version: &str,
        host: &HostInfo,
        info: &VersionInfoConfig,
    ) -> Result<Self> {
        let version_list = version_to_list(version)?;
        let machine = host.normalized_machine();
        let (suffix, paren) = if machine.is_empty() {
            (String::new(), String::new())
        } else {
            (format!("_{machine}"), format!(" ({machine})"))
        };

        let strings = vec![
            ("Comments", format!("{product}{suffix} Command Line Interface")),
            ("CompanyName", info.company.clone()),
            ("FileDescription", format!("{product}{paren}")),
            ("FileVersion", version.to_string()),
            ("InternalName", format!("{product}{suffix}")),
            ("LegalCopyright", info.copyright.clone()),
            ("OriginalFilename", format!("{product}{suffix}.exe")),
            ("ProductName", format!("{product}{suffix}")),
            (
                "ProductVersion",
                format!("{version}{suffix} on Python {}", host.python_version),
            ),
        ];

        Ok(Self {
            version_list,
            strings,
        })
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&str> {
        self.strings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the record as a PyInstaller version file.
    pub fn render(&self) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string("version_info", VERSION_INFO_TEMPLATE)
            .map_err(|e| Error::GenericError(format!("failed to register version template: {e}")))?;

        let tuple = format!(
            "({}, {}, {}, {})",
            self.version_list[0], self.version_list[1], self.version_list[2], self.version_list[3]
        );
        let data = TemplateData {
            filevers: tuple.clone(),
            prodvers: tuple,
            strings: self
                .strings
                .iter()
                .map(|(key, value)| StringEntry {
                    key: python_literal(key),
                    value: python_literal(value),
                })
                .collect(),
        };

        Ok(handlebars.render("version_info", &data)?)
    }
}

/// Quotes `value` as a single-quoted Python string literal.
pub fn python_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Writes `resource` into `exe`. Does nothing unless `host` is Windows.
pub async fn write_version_info(
    interpreter: &Interpreter,
    host: &HostInfo,
    exe: &Path,
    resource: &VersionResource,
    cwd: &Path,
) -> Result<()> {
    if !host.is_windows() {
        log::debug!("Skipping version resource: host platform is {}", host.platform);
        return Ok(());
    }

    let contents = resource.render()?;

    let mut file = tempfile::Builder::new()
        .prefix("version_info_")
        .suffix(".txt")
        .tempfile()
        .map_err(Error::IoError)?;
    file.write_all(contents.as_bytes())
        .fs_context("writing version file", file.path())?;
    file.flush().fs_context("flushing version file", file.path())?;

    log::info!("Setting version info on {}", exe.display());
    let args = vec![
        file.path().display().to_string(),
        exe.display().to_string(),
    ];
    let status = interpreter.run_module(SET_VERSION_MODULE, &args, cwd).await?;
    if !status.success() {
        return Err(Error::ToolFailed {
            tool: "set_version".to_string(),
            code: status.code(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(machine: &str, bits: &str) -> VersionResource {
        let host = HostInfo::new("win32", machine, bits, "3.11.4");
        VersionResource::new(
            "db_polluteur",
            "2023.03.04",
            &host,
            &VersionInfoConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn x64_strings_have_no_suffix() {
        let res = resource("AMD64", "64bit");
        assert_eq!(res.version_list, [2023, 3, 4, 0]);
        assert_eq!(res.get("Comments"), Some("db_polluteur Command Line Interface"));
        assert_eq!(res.get("FileDescription"), Some("db_polluteur"));
        assert_eq!(res.get("OriginalFilename"), Some("db_polluteur.exe"));
        assert_eq!(res.get("ProductVersion"), Some("2023.03.04 on Python 3.11.4"));
        assert_eq!(res.get("CompanyName"), Some("https://github.com/db_polluteur"));
    }

    #[test]
    fn x86_strings_carry_machine() {
        let res = resource("AMD64", "32bit");
        assert_eq!(res.get("Comments"), Some("db_polluteur_x86 Command Line Interface"));
        assert_eq!(res.get("FileDescription"), Some("db_polluteur (x86)"));
        assert_eq!(res.get("InternalName"), Some("db_polluteur_x86"));
        assert_eq!(res.get("OriginalFilename"), Some("db_polluteur_x86.exe"));
        assert_eq!(res.get("ProductName"), Some("db_polluteur_x86"));
        assert_eq!(res.get("ProductVersion"), Some("2023.03.04_x86 on Python 3.11.4"));
        assert_eq!(res.get("FileVersion"), Some("2023.03.04"));
    }

    #[test]
    fn string_table_order() {
        let keys: Vec<&str> = resource("ARM64", "64bit").strings.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "Comments",
                "CompanyName",
                "FileDescription",
                "FileVersion",
                "InternalName",
                "LegalCopyright",
                "OriginalFilename",
                "ProductName",
                "ProductVersion",
            ]
        );
    }

    #[test]
    fn invalid_version_rejected() {
        let host = HostInfo::new("win32", "AMD64", "64bit", "3.11.4");
        let err = VersionResource::new("x", "1.2.beta", &host, &VersionInfoConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    #[test]
    fn nightly_version_is_written_unmasked() {
        let host = HostInfo::new("win32", "AMD64", "64bit", "3.11.4");
        let res = VersionResource::new(
            "db_polluteur",
            "2023.11.16.232502",
            &host,
            &VersionInfoConfig::default(),
        )
        .unwrap();
        assert_eq!(res.version_list, [2023, 11, 16, 232502]);
        let text = res.render().unwrap();
        assert!(text.contains("filevers=(2023, 11, 16, 232502),"));
        assert!(text.contains("StringStruct('FileVersion', '2023.11.16.232502'),"));
    }

    #[test]
    fn rendered_file_contains_record() {
        let text = resource("AMD64", "32bit").render().unwrap();
        assert!(text.starts_with("# UTF-8\nVSVersionInfo("));
        assert!(text.contains("filevers=(2023, 3, 4, 0),"));
        assert!(text.contains("prodvers=(2023, 3, 4, 0),"));
        assert!(text.contains("mask=0x3f,"));
        assert!(text.contains("'040904B0'"));
        assert!(text.contains("StringStruct('FileDescription', 'db_polluteur (x86)'),"));
        assert!(text.contains(
            "StringStruct('ProductVersion', '2023.03.04_x86 on Python 3.11.4')])"
        ));
        assert!(text.contains("VarStruct('Translation', [0, 1200])"));
        assert!(!text.contains("&#x27;"));
    }

    #[test]
    fn literals_are_escaped() {
        assert_eq!(python_literal("plain"), "'plain'");
        assert_eq!(python_literal("it's"), "'it\\'s'");
        assert_eq!(python_literal("a\\b"), "'a\\\\b'");
        assert_eq!(python_literal("line\nbreak"), "'line\\nbreak'");
        assert_eq!(python_literal("\u{1}"), "'\\x01'");
        assert_eq!(python_literal("Ünïcode"), "'Ünïcode'");
    }

    #[tokio::test]
    async fn non_windows_host_is_a_no_op() {
        let host = HostInfo::new("linux", "x86_64", "64bit", "3.11.4");
        let res = VersionResource::new("x", "1.0", &host, &VersionInfoConfig::default()).unwrap();
        let interpreter = Interpreter::new("/nonexistent/python-for-tests");
        let dir = tempfile::tempdir().unwrap();
        write_version_info(&interpreter, &host, Path::new("dist/x"), &res, dir.path())
            .await
            .unwrap();
    }
}
