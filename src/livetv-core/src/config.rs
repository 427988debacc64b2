use crate::paths::AppDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

const CURRENT_CONFIG_VERSION: u32 = 1;

pub const DEFAULT_BASE_URL: &str = "https://iptv-org.github.io";
pub const DEFAULT_FLAG_BASE_URL: &str = "https://flagcdn.com/w320";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_config_version")]
    pub config_version: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            logging: LoggingConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
    #[serde(default = "default_stdout_enabled")]
    pub stdout: bool,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_log_files: default_max_log_files(),
            stdout: default_stdout_enabled(),
            file_name: None,
        }
    }
}

/// Where the catalog lives and how it is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Flag images are served from `{flag_base_url}/{code}.png`.
    #[serde(default = "default_flag_base_url")]
    pub flag_base_url: String,
    /// Keep the country list for the life of the provider instance.
    #[serde(default = "default_cache_countries")]
    pub cache_countries: bool,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            flag_base_url: default_flag_base_url(),
            cache_countries: default_cache_countries(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config validation failed: {0}")]
    Validation(ValidationError),
    #[error("failed to prepare configuration directories: {0}")]
    Directories(#[from] crate::paths::DirsError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported config_version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("catalog.{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },
    #[error("catalog.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

impl Config {
    pub fn load_or_default(dirs: &AppDirs) -> Result<Self, ConfigError> {
        dirs.ensure_exists()?;
        let path = Self::config_path(dirs);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    /// Parse and validate a config document that did not come from disk.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate().map_err(ConfigError::Validation)?;
        Ok(config)
    }

    pub fn config_path(dirs: &AppDirs) -> PathBuf {
        dirs.config_dir().join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.config_version != CURRENT_CONFIG_VERSION {
            return Err(ValidationError::UnsupportedVersion {
                found: self.config_version,
                expected: CURRENT_CONFIG_VERSION,
            });
        }
        self.catalog.validate()
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("base_url", &self.base_url),
            ("flag_base_url", &self.flag_base_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ValidationError::InvalidUrl {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout {
                field: "connect_timeout_secs",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout {
                field: "request_timeout_secs",
            });
        }
        Ok(())
    }
}

fn default_config_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_max_log_files() -> usize {
    7
}

fn default_stdout_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_flag_base_url() -> String {
    DEFAULT_FLAG_BASE_URL.to_string()
}

fn default_cache_countries() -> bool {
    true
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.max_log_files, 7);
        assert!(config.logging.stdout);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.catalog.base_url, "https://iptv-org.github.io");
        assert!(config.catalog.cache_countries);
    }

    #[test]
    fn invalid_version_rejected() {
        let mut config = Config::default();
        config.config_version = CURRENT_CONFIG_VERSION + 1;
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn partial_catalog_section_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [catalog]
            base_url = "http://localhost:8080"
            cache_countries = false
            "#,
        )
        .expect("config should parse");
        assert_eq!(config.catalog.base_url, "http://localhost:8080");
        assert!(!config.catalog.cache_countries);
        assert_eq!(config.catalog.flag_base_url, DEFAULT_FLAG_BASE_URL);
        assert_eq!(config.catalog.request_timeout_secs, 20);
    }

    #[test]
    fn bad_base_url_rejected() {
        let mut config = Config::default();
        config.catalog.base_url = "not a url".into();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl {
                field: "base_url",
                value: "not a url".into(),
            })
        );
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = Config::default();
        config.catalog.connect_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ZeroTimeout { .. })
        ));
    }

    #[test]
    fn load_reads_config_file_from_dirs() {
        let root = tempdir().unwrap();
        let dirs = AppDirs::rooted_at(root.path());
        dirs.ensure_exists().unwrap();
        fs::write(
            Config::config_path(&dirs),
            "[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_or_default(&dirs).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = tempdir().unwrap();
        let dirs = AppDirs::rooted_at(root.path());
        let config = Config::load_or_default(&dirs).unwrap();
        assert_eq!(config.catalog, CatalogConfig::default());
    }
}
