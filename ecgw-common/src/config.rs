//! Configuration loading and config file resolution
//!
//! Config file resolution order:
//! 1. Command-line argument (highest priority)
//! 2. `ECGW_CONFIG` environment variable
//! 3. `<user config dir>/ecgw/config.toml`
//! 4. Compiled defaults (fallback)
//!
//! A missing file never stops startup: a warning is logged and defaults are
//! used. A file that was named explicitly (CLI or environment) but does not
//! parse is an error; an unparsable user-level file is skipped with a warning.
//!
//! Classification thresholds are fixed and deliberately absent here.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "ECGW_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub signal: SignalConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Signal acquisition parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Sampling rate of beat sample indices (Hz)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate_hz: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: default_sampling_rate(),
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Report output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Directory for JSON exports (current directory if not specified)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sampling_rate() -> f64 {
    360.0
}

impl TomlConfig {
    /// Reject values the analysis cannot use
    pub fn validate(&self) -> Result<()> {
        let rate = self.signal.sampling_rate_hz;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::Config(format!(
                "signal.sampling_rate_hz must be positive, got {}",
                rate
            )));
        }
        Ok(())
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    UserConfig(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::UserConfig(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }

    fn is_explicit(&self) -> bool {
        matches!(self, ConfigSource::CommandLine(_) | ConfigSource::Environment(_))
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CommandLine(p) => write!(f, "{} (command line)", p.display()),
            ConfigSource::Environment(p) => write!(f, "{} ({})", p.display(), CONFIG_ENV_VAR),
            ConfigSource::UserConfig(p) => write!(f, "{} (user config)", p.display()),
            ConfigSource::Defaults => write!(f, "compiled defaults"),
        }
    }
}

/// Resolves and loads the config file following the priority order above
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Pick the highest-priority candidate without reading it
    pub fn locate(&self) -> ConfigSource {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_path {
            return ConfigSource::CommandLine(path.clone());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return ConfigSource::Environment(PathBuf::from(path));
            }
        }

        // Priority 3: User config file (only when it exists)
        if let Some(path) = default_config_path() {
            if path.exists() {
                return ConfigSource::UserConfig(path);
            }
        }

        // Priority 4: Compiled defaults
        ConfigSource::Defaults
    }

    /// Load the effective configuration
    ///
    /// # Errors
    ///
    /// `Error::Config` when an explicitly named file exists but cannot be
    /// parsed or holds invalid values.
    pub fn load(&self) -> Result<(TomlConfig, ConfigSource)> {
        let source = self.locate();
        let path = match source.path() {
            Some(path) => path.to_path_buf(),
            None => {
                info!("No config file found, using compiled defaults");
                return Ok((TomlConfig::default(), source));
            }
        };

        if !path.exists() {
            warn!("Config file {} not found, using compiled defaults", source);
            return Ok((TomlConfig::default(), ConfigSource::Defaults));
        }

        match load_config_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", source);
                Ok((config, source))
            }
            Err(e) if !source.is_explicit() => {
                warn!("Ignoring {}: {}", source, e);
                Ok((TomlConfig::default(), ConfigSource::Defaults))
            }
            Err(e) => Err(e),
        }
    }
}

/// Default user config file location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecgw").join("config.toml"))
}

/// Read, parse and validate one config file
pub fn load_config_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    config.validate()?;
    Ok(config)
}

/// Write a config file atomically (temp file + rename)
///
/// Parent directories are created as needed.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    std::fs::write(&temp_path, content)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}
