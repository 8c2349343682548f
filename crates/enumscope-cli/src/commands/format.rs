//! Format command - show one raw value the way the debugger would

use anyhow::{Context, Result};
use enumscope_runtime::debugger::{ConfigCatalog, TypeResolver};
use enumscope_runtime::RawEnumValue;

use super::{parse_raw_value, CatalogOptions};

/// Arguments for the format command
#[derive(Debug, Clone, Default)]
pub struct FormatArgs {
    /// Enum type name from the catalog
    pub type_name: String,
    /// Raw value as typed by the user
    pub value: String,
    pub catalog: CatalogOptions,
    /// Emit a JSON object instead of the bare text
    pub json: bool,
}

/// Run the format command
pub fn run(args: FormatArgs) -> Result<()> {
    println!("{}", render(&args)?);
    Ok(())
}

/// Produce the command output without printing it.
pub fn render(args: &FormatArgs) -> Result<String> {
    let config = args.catalog.load()?;
    let formatter = args.catalog.formatter(&config);
    let descriptor = ConfigCatalog::from_project(&config.project)
        .resolve(&args.type_name)
        .with_context(|| format!("Cannot format value of type '{}'", args.type_name))?;

    let value = parse_raw_value(&args.value)?;
    let raw = RawEnumValue::checked(value, descriptor.repr()).ok_or_else(|| {
        anyhow::anyhow!(
            "Value {} does not fit underlying type {} of '{}'",
            value,
            descriptor.repr(),
            descriptor.name()
        )
    })?;

    let formatted = formatter.format_with_path(&descriptor, raw);
    if !args.json {
        return Ok(formatted.text);
    }

    let output = serde_json::json!({
        "type": descriptor.name(),
        "underlying": descriptor.repr().to_string(),
        "raw": raw.to_string(),
        "value": formatted.text,
        "path": formatted.path,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
[[enum]]
name = "FileAccess"
underlying = "u8"
flags = true
members = [
    { name = "append", value = 4 },
    { name = "write", value = 2 },
    { name = "read", value = 1 },
]

[[enum]]
name = "Broken"
underlying = "u8"
members = [{ name = "huge", value = 300 }]
"#;

    fn args(dir: &Path, type_name: &str, value: &str) -> FormatArgs {
        let path = dir.join("enumscope.toml");
        fs::write(&path, CATALOG).unwrap();
        FormatArgs {
            type_name: type_name.to_string(),
            value: value.to_string(),
            catalog: CatalogOptions {
                config: Some(path),
                separator: None,
            },
            json: false,
        }
    }

    #[test]
    fn test_render_text() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        assert_eq!(
            render(&args(dir, "FileAccess", "7")).unwrap(),
            "read | write | append"
        );
        assert_eq!(render(&args(dir, "FileAccess", "0x2")).unwrap(), "write");
        assert_eq!(render(&args(dir, "FileAccess", "8")).unwrap(), "8");
    }

    #[test]
    fn test_render_separator_override() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = args(temp_dir.path(), "FileAccess", "3");
        args.catalog.separator = Some(",".to_string());
        assert_eq!(render(&args).unwrap(), "read,write");
    }

    #[test]
    fn test_render_json() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = args(temp_dir.path(), "FileAccess", "5");
        args.json = true;
        let output: serde_json::Value = serde_json::from_str(&render(&args).unwrap()).unwrap();
        assert_eq!(
            output,
            serde_json::json!({
                "type": "FileAccess",
                "underlying": "u8",
                "raw": "5",
                "value": "read | append",
                "path": "decomposition",
            })
        );
    }

    #[test]
    fn test_render_out_of_range_value() {
        let temp_dir = TempDir::new().unwrap();
        let err = render(&args(temp_dir.path(), "FileAccess", "256")).unwrap_err();
        assert!(err.to_string().contains("does not fit underlying type u8"));
    }

    #[test]
    fn test_render_unknown_type() {
        let temp_dir = TempDir::new().unwrap();
        let err = render(&args(temp_dir.path(), "Nope", "1")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown enum type 'Nope'"));
    }

    #[test]
    fn test_render_invalid_catalog_entry() {
        let temp_dir = TempDir::new().unwrap();
        let err = render(&args(temp_dir.path(), "Broken", "1")).unwrap_err();
        assert!(format!("{err:#}").contains("'huge' value 300"));
    }
}
