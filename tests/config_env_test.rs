//! Tests for MUTXML_* environment overrides.
//!
//! These mutate the process environment, so they live in their own test binary
//! and serialize on ENV_LOCK.

use std::sync::Mutex;

use mutxml::{InfraError, Settings};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn load_with_env(key: &str, value: &str) -> Result<Settings, InfraError> {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(key, value);
    let settings = Settings::load(None);
    std::env::remove_var(key);
    settings
}

#[test]
fn given_env_override_when_load_then_env_wins() {
    let settings = load_with_env("MUTXML_XML_DECLARATION", "false").expect("load settings");

    assert!(!settings.xml_declaration);
}

#[test]
fn given_env_indent_when_load_then_replaces_default() {
    let settings = load_with_env("MUTXML_INDENT", "6").expect("load settings");

    assert_eq!(settings.indent, 6);
}

#[test]
fn given_non_numeric_env_indent_when_load_then_returns_config_error() {
    let result = load_with_env("MUTXML_INDENT", "wide");

    assert!(matches!(result, Err(InfraError::Config { .. })));
}

#[test]
fn given_negative_env_indent_when_load_then_returns_config_error() {
    let err = load_with_env("MUTXML_INDENT", "-1").unwrap_err();

    assert!(err.to_string().contains("indent must not be negative"));
}

#[test]
fn given_non_boolean_env_declaration_when_load_then_returns_config_error() {
    let result = load_with_env("MUTXML_XML_DECLARATION", "maybe");

    assert!(matches!(result, Err(InfraError::Config { .. })));
}
