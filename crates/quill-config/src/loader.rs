//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::format::OutputFormat;
use crate::settings::Settings;
use crate::{ConfigError, ConfigResult, PROJECT_CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.quill/config.toml) - lowest priority
/// 2. Project config (./quill.toml) - overrides global
/// 3. Environment variables (QUILL_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective settings after merging every layer
    pub settings: Settings,

    /// Project root directory (where quill.toml was found)
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Create a loader that reads the global layer from a specific file
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find quill.toml, then merges it over the
    /// global config if one exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;
        self.assemble(project, project_root)
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = Settings::load_from_file(config_path)?;
        let project_root = config_path.parent().map(|p| p.to_path_buf());
        self.assemble(project, project_root)
    }

    fn assemble(
        &mut self,
        project: Settings,
        project_root: Option<PathBuf>,
    ) -> ConfigResult<Config> {
        // Global config is optional; a missing home directory is not an error
        let mut settings = match self.load_global_config() {
            Ok(global) => global,
            Err(ConfigError::HomeNotFound) => Settings::default(),
            Err(e) => return Err(e),
        };
        settings.merge(&project);
        let settings = self.apply_env_overrides(settings)?;

        Ok(Config {
            settings,
            project_root,
        })
    }

    /// Find project configuration by walking up directory tree
    ///
    /// Returns (project_root, project_settings)
    fn find_project_config(&self, start_dir: &Path) -> ConfigResult<(Option<PathBuf>, Settings)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let settings = Settings::load_from_file(&config_path)?;
                return Ok((Some(current), settings));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                // Reached filesystem root without finding quill.toml
                None => return Ok((None, Settings::default())),
            }
        }
    }

    /// Load global configuration from ~/.quill/config.toml
    fn load_global_config(&mut self) -> ConfigResult<Settings> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => {
                let path = Self::global_config_dir()?.join("config.toml");
                self.global_config_path = Some(path.clone());
                path
            }
        };

        if !path.exists() {
            return Ok(Settings::default());
        }

        Settings::load_from_file(&path)
    }

    /// Apply environment variable overrides
    ///
    /// Recognized: QUILL_FORMAT, QUILL_SORT_KEYS, QUILL_PROMPT
    fn apply_env_overrides(&self, mut settings: Settings) -> ConfigResult<Settings> {
        if let Ok(format) = env::var("QUILL_FORMAT") {
            let format: OutputFormat = format.parse()?;
            settings.output.get_or_insert_with(Default::default).format = Some(format);
        }

        if let Ok(sort) = env::var("QUILL_SORT_KEYS") {
            settings.output.get_or_insert_with(Default::default).sort_keys =
                Some(parse_flag("QUILL_SORT_KEYS", &sort)?);
        }

        if let Ok(prompt) = env::var("QUILL_PROMPT") {
            settings.input.get_or_insert_with(Default::default).prompt =
                Some(parse_flag("QUILL_PROMPT", &prompt)?);
        }

        Ok(settings)
    }

    /// Get the global configuration directory (~/.quill)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".quill"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a boolean environment flag
fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

impl Config {
    /// Effective output format (default: yaml)
    pub fn format(&self) -> OutputFormat {
        self.settings.format().unwrap_or_default()
    }

    /// Whether output keys are sorted (default: declaration order)
    pub fn sort_keys(&self) -> bool {
        self.settings.sort_keys().unwrap_or(false)
    }

    /// Whether to print the input hint (default: true)
    pub fn prompt(&self) -> bool {
        self.settings.prompt().unwrap_or(true)
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a quill.toml was found
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

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        fs::write(&config_path, content).unwrap();
        config_path
    }

    fn isolated_loader(dir: &TempDir) -> ConfigLoader {
        ConfigLoader::with_global_path(dir.path().join("no-global.toml"))
    }

    #[test]
    #[serial]
    fn test_load_project_config() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[output]
format = "json"
"#,
        );

        let config = isolated_loader(&temp_dir)
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert_eq!(config.format(), OutputFormat::Json);
        assert!(config.is_project());
    }

    #[test]
    #[serial]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[output]
sort_keys = true
"#,
        );

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let config = isolated_loader(&temp_dir).load_from_directory(&sub_dir).unwrap();

        assert!(config.sort_keys());
        assert_eq!(config.project_root(), Some(temp_dir.path()));
    }

    #[test]
    #[serial]
    fn test_env_override_format() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[output]
format = "json"
"#,
        );

        env::set_var("QUILL_FORMAT", "toml");
        let result = isolated_loader(&temp_dir).load_from_directory(temp_dir.path());
        env::remove_var("QUILL_FORMAT");

        assert_eq!(result.unwrap().format(), OutputFormat::Toml);
    }

    #[test]
    #[serial]
    fn test_env_override_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("QUILL_SORT_KEYS", "maybe");
        let result = isolated_loader(&temp_dir).load_from_directory(temp_dir.path());
        env::remove_var("QUILL_SORT_KEYS");

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format(), OutputFormat::Yaml);
        assert!(!config.sort_keys());
        assert!(config.prompt());
        assert!(!config.is_project());
    }

    #[test]
    fn test_parse_flag_values() {
        assert!(parse_flag("X", "Yes").unwrap());
        assert!(!parse_flag("X", "off").unwrap());
        assert!(parse_flag("X", "2").is_err());
    }
}
