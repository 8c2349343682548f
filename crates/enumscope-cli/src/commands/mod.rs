pub mod format;
pub mod mi;
pub mod print;
pub mod types;

use anyhow::{Context, Result};
use enumscope_config::{Config, ConfigLoader};
use enumscope_runtime::debugger::InspectionSession;
use enumscope_runtime::EnumFormatter;
use std::path::{Path, PathBuf};

/// Where the enum catalog comes from and how flags are joined.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Explicit project file; otherwise enumscope.toml is searched upwards
    /// from the current directory.
    pub config: Option<PathBuf>,
    /// Overrides every configured flags separator.
    pub separator: Option<String>,
}

impl CatalogOptions {
    pub fn load(&self) -> Result<Config> {
        load_config(self.config.as_deref())
    }

    pub fn formatter(&self, config: &Config) -> EnumFormatter {
        let separator = self
            .separator
            .as_deref()
            .unwrap_or_else(|| config.flags_separator());
        EnumFormatter::new().with_separator(separator)
    }

    /// Inspection session over the configured catalog and frame.
    pub fn session(&self) -> Result<InspectionSession> {
        let config = self.load()?;
        let formatter = self.formatter(&config);
        Ok(InspectionSession::from_project(&config.project, formatter))
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    match path {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration '{}'", path.display())),
        None => {
            let cwd = std::env::current_dir()?;
            let config = loader
                .load_from_directory(&cwd)
                .context("Failed to load enumscope.toml")?;
            if !config.is_project() {
                tracing::debug!(cwd = %cwd.display(), "no enumscope.toml found");
            }
            Ok(config)
        }
    }
}

/// Parse a raw value typed by the user: decimal, or `0x`/`0o`/`0b`
/// prefixed, optionally negative, with `_` separators allowed.
pub fn parse_raw_value(text: &str) -> Result<i128> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let prefix = digits.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match prefix.as_deref() {
        Some("0x") => (16, &digits[2..]),
        Some("0o") => (8, &digits[2..]),
        Some("0b") => (2, &digits[2..]),
        _ => (10, digits),
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        anyhow::bail!("Invalid value '{}': expected an integer", text);
    }

    let magnitude = i128::from_str_radix(digits, radix)
        .with_context(|| format!("Invalid value '{}': expected an integer", text))?;
    Ok(if negative { -magnitude } else { magnitude })
}
