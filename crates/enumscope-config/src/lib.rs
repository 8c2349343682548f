//! Configuration for enumscope sessions.
//!
//! Two TOML files are involved:
//! - `enumscope.toml` in the project: display settings, the enum type
//!   catalog and a canned frame of variables,
//! - `~/.enumscope/config.toml` for the user: display defaults only.
//!
//! [`ConfigLoader`] finds and reads both and applies `ENUMSCOPE_*`
//! environment overrides; command-line flags are the caller's business.
//!
//! ```no_run
//! use enumscope_config::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::new().load_from_directory(Path::new("."))?;
//! println!("separator {:?}", config.flags_separator());
//! # Ok::<(), enumscope_config::ConfigError>(())
//! ```

pub mod global;
pub mod loader;
pub mod project;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "enumscope.toml";

/// Separator placed between flag names when none is configured.
pub const DEFAULT_FLAGS_SEPARATOR: &str = " | ";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Read and deserialize one TOML configuration file.
pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::IoError(e),
    })?;
    toml::from_str(&content).map_err(|error| ConfigError::TomlParseError {
        file: path.to_path_buf(),
        error,
    })
}

pub use global::GlobalConfig;
pub use loader::{Config, ConfigLoader, FLAGS_SEPARATOR_ENV};
pub use project::{
    DisplayConfig, EnumDefinition, MemberDefinition, ProjectConfig, VariableDefinition,
};
