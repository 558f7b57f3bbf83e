//! Integration tests for Settings layered loading.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they test explicit config files merged over compiled defaults.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use mutxml::{InfraError, Settings};

#[test]
fn given_no_config_when_default_then_uses_cwd_and_two_space_indent() {
    let settings = Settings::default();

    assert_eq!(settings.output_dir, std::env::current_dir().unwrap());
    assert_eq!(settings.indent, 2);
    assert!(settings.xml_declaration);
}

#[test]
fn given_config_file_when_load_then_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("mutxml.toml");
    fs::write(&config_path, "output_dir = \"/tmp/results\"\nindent = 4\n").unwrap();

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    assert_eq!(settings.output_dir, PathBuf::from("/tmp/results"));
    assert_eq!(settings.indent, 4);
}

#[test]
fn given_partial_config_file_when_load_then_keeps_unspecified_defaults() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("mutxml.toml");
    fs::write(&config_path, "indent = 3\n").unwrap();

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    assert_eq!(settings.indent, 3);
    assert_eq!(settings.output_dir, Settings::default().output_dir);
}

#[test]
fn given_missing_config_file_when_load_then_returns_config_error() {
    let result = Settings::load(Some(Path::new("/nonexistent/mutxml.toml")));

    assert!(matches!(result, Err(InfraError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_then_returns_config_error() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("mutxml.toml");
    fs::write(&config_path, "indent = \"wide\"\n").unwrap();

    let err = Settings::load(Some(&config_path)).unwrap_err();

    assert!(err.to_string().starts_with("config error: parse"));
}

#[test]
fn given_home_relative_output_dir_when_load_then_expands_tilde() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("mutxml.toml");
    fs::write(&config_path, "output_dir = \"~/mutxml-out\"\n").unwrap();

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    assert!(!settings.output_dir.starts_with("~"));
    assert!(settings.output_dir.ends_with("mutxml-out"));
}

#[test]
fn given_relative_filename_when_resolving_then_joins_output_dir() {
    let settings = Settings::with_output_dir("/data/out");

    assert_eq!(
        settings.resolve_output("subjects.xml"),
        PathBuf::from("/data/out/subjects.xml")
    );
    assert_eq!(
        settings.resolve_output("/abs/subjects.xml"),
        PathBuf::from("/abs/subjects.xml")
    );
}
