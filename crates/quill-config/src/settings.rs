//! Settings file schema
//!
//! The same schema is used by the global file (`~/.quill/config.toml`) and the
//! project file (`quill.toml`).

use crate::format::OutputFormat;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of one configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSettings>,

    /// Input settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSettings>,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Serialization format (default: yaml)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Sort keys alphabetically instead of keeping declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_keys: Option<bool>,
}

/// `[input]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct InputSettings {
    /// Print the input hint when reading from a terminal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<bool>,
}

impl Settings {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::TomlParseError { error, .. } => ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: Default::default(),
            error: e,
        })
    }

    /// Configured output format, if any
    pub fn format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    /// Configured key sorting, if any
    pub fn sort_keys(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.sort_keys)
    }

    /// Configured prompting, if any
    pub fn prompt(&self) -> Option<bool> {
        self.input.as_ref().and_then(|i| i.prompt)
    }

    /// Merge another settings value into this one.
    /// Other settings take precedence field by field for non-None values.
    pub fn merge(&mut self, other: &Settings) {
        if let Some(out) = &other.output {
            let mine = self.output.get_or_insert_with(Default::default);
            if out.format.is_some() {
                mine.format = out.format;
            }
            if out.sort_keys.is_some() {
                mine.sort_keys = out.sort_keys;
            }
        }
        if let Some(input) = &other.input {
            let mine = self.input.get_or_insert_with(Default::default);
            if input.prompt.is_some() {
                mine.prompt = input.prompt;
            }
        }
    }
}
