//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests that manipulate ECGW_CONFIG are marked with #[serial] so they run
//! sequentially, not in parallel.

use ecgw_common::config::{
    load_config_file, write_toml_config, ConfigResolver, ConfigSource, OutputFormat, TomlConfig,
    CONFIG_ENV_VAR,
};
use ecgw_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_write_then_load_preserves_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let mut config = TomlConfig::default();
    config.logging.level = "debug".to_string();
    config.signal.sampling_rate_hz = 250.0;
    config.output.format = OutputFormat::Json;
    config.output.export_dir = Some(PathBuf::from("/var/tmp/ecgw"));

    write_toml_config(&config, &path).unwrap();

    assert!(path.exists());
    assert!(!temp_dir.path().join("nested").join("config.toml.tmp").exists());
    assert_eq!(load_config_file(&path).unwrap(), config);
}

#[test]
fn test_load_rejects_invalid_sampling_rate() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[signal]\nsampling_rate_hz = -1.0\n").unwrap();

    assert!(matches!(load_config_file(&path), Err(Error::Config(_))));
}

#[test]
fn test_missing_cli_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = ConfigResolver::new(Some(temp_dir.path().join("absent.toml")));

    let (config, source) = resolver.load().unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(source, ConfigSource::Defaults);
}

#[test]
fn test_unparsable_cli_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "[signal\nsampling_rate_hz = ").unwrap();

    let err = ConfigResolver::new(Some(path)).load().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("Failed to parse"));
}

#[test]
#[serial]
fn test_env_var_used_when_no_cli_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("env.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let result = ConfigResolver::new(None).load();
    env::remove_var(CONFIG_ENV_VAR);

    let (config, source) = result.unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(source, ConfigSource::Environment(path));
}

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join("env.toml");
    let cli_path = temp_dir.path().join("cli.toml");
    std::fs::write(&env_path, "[signal]\nsampling_rate_hz = 500.0\n").unwrap();
    std::fs::write(&cli_path, "[signal]\nsampling_rate_hz = 128.0\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &env_path);
    let result = ConfigResolver::new(Some(cli_path.clone())).load();
    env::remove_var(CONFIG_ENV_VAR);

    let (config, source) = result.unwrap();
    assert_eq!(config.signal.sampling_rate_hz, 128.0);
    assert_eq!(source, ConfigSource::CommandLine(cli_path));
}

#[test]
#[serial]
fn test_empty_env_var_is_ignored() {
    env::set_var(CONFIG_ENV_VAR, "  ");
    let source = ConfigResolver::new(None).locate();
    env::remove_var(CONFIG_ENV_VAR);

    assert!(!matches!(source, ConfigSource::Environment(_)));
}
