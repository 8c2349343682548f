//! Global Configuration (~/.enumscope/config.toml)
//!
//! Handles user-level configuration stored in `~/.enumscope/config.toml`.

use crate::project::DisplayConfig;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration from ~/.enumscope/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Display defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

impl GlobalConfig {
    /// Read `~/.enumscope/config.toml` or a file of the same shape.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        crate::read_toml(path)
    }

    /// Get the global config file path (~/.enumscope/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".enumscope").join("config.toml"))
    }

    /// Get the default flags separator
    pub fn flags_separator(&self) -> Option<&str> {
        self.display
            .as_ref()
            .and_then(|d| d.flags_separator.as_deref())
    }

    /// Overlay `other`; its display section replaces ours when present.
    pub fn merge(&mut self, other: &GlobalConfig) {
        if other.display.is_some() {
            self.display = other.display.clone();
        }
    }
}
