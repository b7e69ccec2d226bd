//! Tests for TOML config loading, creation, and path resolution.

use super::template::default_config_toml;
use super::*;
use crate::schema::AtelierConfig;
use atelier_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_atelier_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[viewer.material]
alpha_test = 0.05
outline_color = "#c0a060"

[rental]
lead_time_days = 3
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!((config.viewer.material.alpha_test - 0.05).abs() < f64::EPSILON);
    assert_eq!(config.viewer.material.outline_color, "#c0a060");
    assert_eq!(config.rental.lead_time_days, 3);
    // Defaults preserved
    assert!((config.rental.deposit_rate - 0.35).abs() < f64::EPSILON);
    assert_eq!(config.network.proxy_tag, "bridal3d");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[viewer.material]
alpha_test = 3.0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!((config.viewer.material.alpha_test - 0.02).abs() < f64::EPSILON);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atelier").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.viewer.frame.max_fps, 0);
    assert_eq!(config.conversion.delay_ms, 2200);
}

#[test]
fn default_config_toml_is_valid() {
    let content = default_config_toml();
    let config: AtelierConfig = toml::from_str(&content).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("atelier"));
        assert!(path_str.ends_with("config.toml"));
    }
}
