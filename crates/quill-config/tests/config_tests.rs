//! Configuration loading and precedence tests

use quill_config::{ConfigError, ConfigLoader, OutputFormat, Settings, PROJECT_CONFIG_FILE};
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Layer precedence
// ============================================================================

#[test]
#[serial]
fn test_project_overrides_global() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let global = write_file(
        home.path(),
        "config.toml",
        r#"
[output]
format = "toml"
sort_keys = true

[input]
prompt = false
"#,
    );
    write_file(
        project.path(),
        PROJECT_CONFIG_FILE,
        r#"
[output]
format = "json"
"#,
    );

    let config = ConfigLoader::with_global_path(global)
        .load_from_directory(project.path())
        .unwrap();

    assert_eq!(config.format(), OutputFormat::Json);
    // Untouched fields fall through from the global layer
    assert!(config.sort_keys());
    assert!(!config.prompt());
}

#[test]
#[serial]
fn test_env_overrides_project() {
    let project = TempDir::new().unwrap();
    write_file(
        project.path(),
        PROJECT_CONFIG_FILE,
        r#"
[output]
sort_keys = false

[input]
prompt = true
"#,
    );

    env::set_var("QUILL_SORT_KEYS", "1");
    env::set_var("QUILL_PROMPT", "no");
    let result = ConfigLoader::with_global_path(project.path().join("missing.toml"))
        .load_from_directory(project.path());
    env::remove_var("QUILL_SORT_KEYS");
    env::remove_var("QUILL_PROMPT");

    let config = result.unwrap();
    assert!(config.sort_keys());
    assert!(!config.prompt());
}

#[test]
#[serial]
fn test_missing_global_file_is_fine() {
    let project = TempDir::new().unwrap();
    let config = ConfigLoader::with_global_path(project.path().join("nope.toml"))
        .load_from_directory(project.path())
        .unwrap();

    assert!(!config.is_project());
    assert_eq!(config.format(), OutputFormat::Yaml);
}

#[test]
#[serial]
fn test_load_from_specific_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "custom.toml",
        r#"
[output]
format = "yaml"
sort_keys = true
"#,
    );

    let config = ConfigLoader::with_global_path(dir.path().join("nope.toml"))
        .load_from_file(&path)
        .unwrap();

    assert!(config.sort_keys());
    assert_eq!(config.project_root(), Some(dir.path()));
}

// ============================================================================
// Error reporting
// ============================================================================

#[test]
fn test_missing_specific_file() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_syntax_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), PROJECT_CONFIG_FILE, "[output\nformat = ");

    match Settings::load_from_file(&path) {
        Err(ConfigError::TomlParseError { file, .. }) => assert_eq!(file, path),
        other => panic!("expected TomlParseError, got {:?}", other),
    }
}

#[rstest]
#[case("[output]\nformat = \"csv\"\n")]
#[case("[output]\nsort_keys = \"yes\"\n")]
#[case("[input]\necho = true\n")]
#[case("[logging]\nlevel = \"debug\"\n")]
fn test_invalid_settings_rejected(#[case] content: &str) {
    assert!(Settings::parse(content).is_err(), "accepted: {}", content);
}
