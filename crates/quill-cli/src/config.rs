//! Effective CLI settings
//!
//! Command-line flags sit on top of the layered configuration loaded by
//! `quill-config` (global file, project `quill.toml`, `QUILL_*` variables).

use anyhow::{Context, Result};
use quill_config::{Config, ConfigLoader};
use quill_runtime::{OutputFormat, OutputOptions};
use std::path::Path;

/// Load configuration, from `explicit` when given, else by searching upward from `cwd`
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    let config = match explicit {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => loader
            .load_from_directory(cwd)
            .context("Failed to load configuration")?,
    };

    if let Some(root) = config.project_root() {
        tracing::debug!(root = %root.display(), "using project configuration");
    }
    Ok(config)
}

/// Settings for one run, after applying flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effective {
    pub output: OutputOptions,
    pub prompt: bool,
}

/// Flags that override configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub sort_keys: bool,
    pub no_prompt: bool,
}

impl Effective {
    /// Format precedence: flag, configuration, OUTPUT's extension, yaml
    pub fn resolve(config: &Config, overrides: Overrides, output_path: &Path) -> Self {
        let format = overrides
            .format
            .or_else(|| config.settings.format())
            .or_else(|| {
                output_path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(OutputFormat::from_extension)
            })
            .unwrap_or_default();

        Self {
            output: OutputOptions::new(format)
                .with_sort_keys(overrides.sort_keys || config.sort_keys()),
            prompt: !overrides.no_prompt && config.prompt(),
        }
    }
}
