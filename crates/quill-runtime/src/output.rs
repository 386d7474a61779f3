//! Rendering a binding table to a serialized document

use crate::bindings::Bindings;
use quill_config::OutputFormat;
use thiserror::Error;

/// Errors raised while serializing bindings
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// How bindings are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Sort entries by name instead of binding order
    pub sort_keys: bool,
}

impl OutputOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            sort_keys: false,
        }
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}

/// Serialize `bindings` as a complete document ending in a newline
pub fn render(bindings: &Bindings, options: &OutputOptions) -> Result<String, OutputError> {
    let sorted;
    let bindings = if options.sort_keys {
        sorted = bindings.sorted();
        &sorted
    } else {
        bindings
    };

    let mut out = match options.format {
        OutputFormat::Yaml => serde_yaml::to_string(bindings)?,
        OutputFormat::Json => serde_json::to_string_pretty(bindings)?,
        OutputFormat::Toml => toml::to_string(bindings)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }

    tracing::debug!(
        format = %options.format,
        entries = bindings.len(),
        bytes = out.len(),
        "rendered bindings"
    );
    Ok(out)
}
