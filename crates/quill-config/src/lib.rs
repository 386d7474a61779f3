//! Quill Configuration System
//!
//! Provides configuration management for the Quill interpreter:
//! - Project configuration (quill.toml)
//! - Global user configuration (~/.quill/config.toml)
//! - Configuration precedence and merging
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.quill/config.toml)
//! 2. Project config (./quill.toml, searched upwards)
//! 3. Environment variables (QUILL_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use quill_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("{}", config.format());
//! ```

pub mod format;
pub mod loader;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

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

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = "quill.toml";

// Re-export main types
pub use format::OutputFormat;
pub use loader::{Config, ConfigLoader};
pub use settings::{InputSettings, OutputSettings, Settings};
