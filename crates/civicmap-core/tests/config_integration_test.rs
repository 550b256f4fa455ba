//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use civicmap_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("CIVICMAP_DEFAULT_PAGE_SIZE");
    env::remove_var("CIVICMAP_MAX_PAGE_SIZE");
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = config_file("default_page_size = 5\nmax_page_size = 15");

    env::set_var("CIVICMAP_MAX_PAGE_SIZE", "12");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.default_page_size.value, 5);
    assert_eq!(config.default_page_size.source, ConfigSource::File);
    assert_eq!(config.max_page_size.value, 12);
    assert_eq!(config.max_page_size.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("CIVICMAP_DEFAULT_PAGE_SIZE", "8");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        default_page_size: Some(4),
        max_page_size: None,
    });

    assert_eq!(config.default_page_size.value, 4);
    assert_eq!(config.default_page_size.source, ConfigSource::Cli);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_value_is_ignored() {
    clear_env();
    env::set_var("CIVICMAP_MAX_PAGE_SIZE", "lots");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.max_page_size.value, 20);
    assert_eq!(config.max_page_size.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_full_precedence_chain_resolves_settings() {
    clear_env();
    let file = config_file("default_page_size = 6\nmax_page_size = 30");
    env::set_var("CIVICMAP_MAX_PAGE_SIZE", "25");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    config.update_from_cli(CliConfigOverrides {
        default_page_size: None,
        max_page_size: Some(18),
    });

    let settings = config.search_settings().unwrap();
    assert_eq!(settings.default_page_size, 6);
    assert_eq!(settings.max_page_size, 18);

    clear_env();
}

#[test]
fn test_missing_file_is_config_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/civicmap.toml");
    assert!(result.is_err());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = config_file("max_page_size = \"twenty\"");
    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}
