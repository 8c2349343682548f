//! CLI configuration via environment variables
//!
//! Settings that only affect how the CLI prints, as opposed to the project
//! and global TOML files handled by `enumscope-config`.

use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON output (ENUMSCOPE_JSON=1)
    pub default_json: bool,
    /// Disable colored output (ENUMSCOPE_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("ENUMSCOPE_JSON")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            no_color: env::var("ENUMSCOPE_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn is_truthy(value: &str) -> bool {
    let lower = value.to_lowercase();
    !(lower.is_empty() || lower == "0" || lower == "false" || lower == "off")
}
