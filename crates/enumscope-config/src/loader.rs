//! Configuration Loader
//!
//! Finds `enumscope.toml`, reads the optional user file and folds in
//! environment overrides. Sources, weakest first:
//!
//! 1. `~/.enumscope/config.toml`
//! 2. `enumscope.toml` of the project
//! 3. `ENUMSCOPE_*` environment variables
//! 4. command-line flags, applied by the caller on top of [`Config`]

use crate::global::GlobalConfig;
use crate::project::{DisplayConfig, ProjectConfig};
use crate::{ConfigResult, DEFAULT_FLAGS_SEPARATOR, PROJECT_CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding `[display] flags_separator`.
pub const FLAGS_SEPARATOR_ENV: &str = "ENUMSCOPE_FLAGS_SEPARATOR";

/// Loads project and user configuration.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// User config location; resolved from the home directory when unset.
    global_config_path: Option<PathBuf>,
}

/// Project and user configuration after loading.
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    /// Directory holding the `enumscope.toml` that was used, if any.
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the user config from `path` instead of `~/.enumscope/config.toml`.
    pub fn with_global_config_path(path: PathBuf) -> Self {
        Self {
            global_config_path: Some(path),
        }
    }

    /// Use the nearest `enumscope.toml` in `start_dir` or one of its
    /// ancestors. Without one the project part stays empty.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let found = start_dir
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file());

        let (project, project_root) = match found {
            Some(path) => {
                let project = ProjectConfig::load_from_file(&path)?;
                (project, path.parent().map(Path::to_path_buf))
            }
            None => (ProjectConfig::default(), None),
        };
        Ok(self.assemble(project, project_root))
    }

    /// Use `config_path` as the project file, whatever its name.
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = ProjectConfig::load_from_file(config_path)?;
        let project_root = config_path.parent().map(Path::to_path_buf);
        Ok(self.assemble(project, project_root))
    }

    fn assemble(&mut self, project: ProjectConfig, project_root: Option<PathBuf>) -> Config {
        Config {
            project: with_env_overrides(project),
            global: self.user_config(),
            project_root,
        }
    }

    /// The user config never blocks a session: unreadable or broken files
    /// are logged and treated as empty.
    fn user_config(&mut self) -> GlobalConfig {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match GlobalConfig::global_config_path() {
                Ok(path) => {
                    self.global_config_path = Some(path.clone());
                    path
                }
                Err(_) => return GlobalConfig::default(),
            },
        };
        if !path.exists() {
            return GlobalConfig::default();
        }

        GlobalConfig::load_from_file(&path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "ignoring user config");
            GlobalConfig::default()
        })
    }
}

fn with_env_overrides(mut project: ProjectConfig) -> ProjectConfig {
    if let Ok(separator) = env::var(FLAGS_SEPARATOR_ENV) {
        tracing::debug!(%separator, "flags separator overridden from environment");
        project
            .display
            .get_or_insert_with(DisplayConfig::default)
            .flags_separator = Some(separator);
    }
    project
}

impl Config {
    /// Separator between decomposed flag names: project, then user config,
    /// then `" | "`.
    pub fn flags_separator(&self) -> &str {
        self.project
            .flags_separator()
            .or_else(|| self.global.flags_separator())
            .unwrap_or(DEFAULT_FLAGS_SEPARATOR)
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Whether an `enumscope.toml` was found.
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn write_project(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(PROJECT_CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    fn isolated_loader(dir: &Path) -> ConfigLoader {
        ConfigLoader::with_global_config_path(dir.join("no-such-global.toml"))
    }

    #[test]
    #[serial]
    fn test_catalog_loaded_from_start_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_project(
            temp_dir.path(),
            r#"
[[enum]]
name = "Color"
members = [{ name = "red", value = 0 }]
"#,
        );

        let config = isolated_loader(temp_dir.path())
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert!(config.is_project());
        assert!(config.project.enum_definition("Color").is_some());
    }

    #[test]
    #[serial]
    fn test_nearest_ancestor_wins() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path(), "[[enum]]\nname = \"Outer\"\n");
        let inner = temp_dir.path().join("inner");
        fs::create_dir(&inner).unwrap();
        write_project(&inner, "[[enum]]\nname = \"Inner\"\n");
        let leaf = inner.join("leaf");
        fs::create_dir(&leaf).unwrap();

        let config = isolated_loader(temp_dir.path())
            .load_from_directory(&leaf)
            .unwrap();

        assert!(config.project.enum_definition("Inner").is_some());
        assert!(config.project.enum_definition("Outer").is_none());
        assert_eq!(config.project_root(), Some(inner.as_path()));
    }

    #[test]
    #[serial]
    fn test_default_separator() {
        env::remove_var(FLAGS_SEPARATOR_ENV);
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert_eq!(config.flags_separator(), " | ");
    }

    #[test]
    #[serial]
    fn test_env_override_separator() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path(), "[display]\nflags_separator = \", \"\n");

        env::set_var(FLAGS_SEPARATOR_ENV, "+");
        let config = isolated_loader(temp_dir.path()).load_from_directory(temp_dir.path());
        env::remove_var(FLAGS_SEPARATOR_ENV);

        assert_eq!(config.unwrap().flags_separator(), "+");
    }

    #[test]
    #[serial]
    fn test_global_separator_used_when_project_silent() {
        env::remove_var(FLAGS_SEPARATOR_ENV);
        let temp_dir = TempDir::new().unwrap();
        let global_path = temp_dir.path().join("global.toml");
        fs::write(&global_path, "[display]\nflags_separator = \" / \"\n").unwrap();
        let project_path = write_project(temp_dir.path(), "");

        let config = ConfigLoader::with_global_config_path(global_path)
            .load_from_file(&project_path)
            .unwrap();
        assert_eq!(config.flags_separator(), " / ");
    }
}
