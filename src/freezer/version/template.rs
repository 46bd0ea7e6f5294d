//! PyInstaller version-file template.
//!
//! The version file is Python source evaluated by PyInstaller's
//! `set_version` utility; every inserted string is already a quoted literal.

pub const VERSION_INFO_TEMPLATE: &str = r#"# UTF-8
VSVersionInfo(
  ffi=FixedFileInfo(
    filevers={{filevers}},
    prodvers={{prodvers}},
    mask=0x3f,
    flags=0x0,
    OS=0x4,
    fileType=0x1,
    subtype=0x0,
    date=(0, 0)
    ),
  kids=[
    StringFileInfo(
      [
      StringTable(
        '040904B0',
        [{{#each strings}}StringStruct({{this.key}}, {{this.value}}){{#unless @last}},
        {{/unless}}{{/each}}])
      ]),
    VarFileInfo([VarStruct('Translation', [0, 1200])])
  ]
)
"#;
