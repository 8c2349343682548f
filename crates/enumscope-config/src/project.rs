//! Project Configuration (enumscope.toml)
//!
//! Handles project-level configuration stored in `enumscope.toml`. Besides the
//! display settings, the project file doubles as an enum type catalog: each
//! `[[enum]]` table describes one enumeration type with its members in
//! declaration order, and each `[[variable]]` table places a value of such a
//! type in the inspected frame.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Underlying integer types accepted in `[[enum]] underlying`.
pub const UNDERLYING_TYPES: &[&str] = &["i8", "u8", "i16", "u16", "i32", "u32", "i64", "u64"];

/// Project configuration from enumscope.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Display settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,

    /// Enum type catalog, in file order
    #[serde(default, rename = "enum")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDefinition>,

    /// Variables of the inspected frame
    #[serde(default, rename = "variable")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableDefinition>,
}

/// Display settings shared by project and global configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Separator placed between decomposed flag names (default: " | ")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags_separator: Option<String>,
}

/// One enumeration type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnumDefinition {
    /// Type name as shown to the user
    pub name: String,

    /// Underlying integer type (default: "i32")
    #[serde(default = "default_underlying")]
    pub underlying: String,

    /// Whether values combine as bit flags
    #[serde(default)]
    pub flags: bool,

    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<MemberDefinition>,
}

/// One named constant of an enumeration type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MemberDefinition {
    pub name: String,
    pub value: i64,
}

/// A variable of the inspected frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VariableDefinition {
    /// Variable name
    pub name: String,

    /// Name of an `[[enum]]` type
    #[serde(rename = "type")]
    pub type_name: String,

    /// Raw integral value
    pub value: i64,
}

fn default_underlying() -> String {
    "i32".to_string()
}

impl ProjectConfig {
    /// Read and validate an `enumscope.toml`.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let config: Self = crate::read_toml(path)?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            enums = config.enums.len(),
            variables = config.variables.len(),
            "loaded project config"
        );
        Ok(config)
    }

    /// Check type-level integrity of the catalog and frame.
    ///
    /// Member names and values are not checked here: duplicate or
    /// out-of-range members are the type catalog's business and are
    /// tolerated or rejected when a descriptor is built from them.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for (index, def) in self.enums.iter().enumerate() {
            if def.name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("enum[{index}].name"),
                    reason: "name cannot be empty".to_string(),
                });
            }
            if !UNDERLYING_TYPES.contains(&def.underlying.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("enum[{index}].underlying"),
                    reason: format!(
                        "expected one of {}, got '{}'",
                        UNDERLYING_TYPES.join(", "),
                        def.underlying
                    ),
                });
            }
            if !seen.insert(def.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "enum type '{}' is defined more than once",
                    def.name
                )));
            }
        }

        for (index, var) in self.variables.iter().enumerate() {
            if var.name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("variable[{index}].name"),
                    reason: "name cannot be empty".to_string(),
                });
            }
            if !seen.contains(var.type_name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("variable[{index}].type"),
                    reason: format!("unknown enum type '{}'", var.type_name),
                });
            }
        }

        Ok(())
    }

    /// Look up an enum definition by type name
    pub fn enum_definition(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.iter().find(|def| def.name == name)
    }

    /// Look up a frame variable by name
    pub fn variable(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|var| var.name == name)
    }

    /// Get the configured flags separator, if present
    pub fn flags_separator(&self) -> Option<&str> {
        self.display
            .as_ref()
            .and_then(|d| d.flags_separator.as_deref())
    }

    /// Overlay `other` onto this config.
    ///
    /// Display settings from `other` win when present. Enum types and
    /// variables from `other` replace same-named entries and are appended
    /// otherwise.
    pub fn merge(&mut self, other: &ProjectConfig) {
        if other.display.is_some() {
            self.display = other.display.clone();
        }
        for def in &other.enums {
            match self.enums.iter_mut().find(|d| d.name == def.name) {
                Some(existing) => *existing = def.clone(),
                None => self.enums.push(def.clone()),
            }
        }
        for var in &other.variables {
            match self.variables.iter_mut().find(|v| v.name == var.name) {
                Some(existing) => *existing = var.clone(),
                None => self.variables.push(var.clone()),
            }
        }
    }
}
