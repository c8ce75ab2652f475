//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//! Every setting has a default, so running without any config works.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dataset::{
    DatasetLoader, DEFAULT_OUTCOME_COLUMN, DEFAULT_PAYLOAD_COLUMN, DEFAULT_SITE_COLUMN,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Launch table location and column names
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    #[serde(default = "default_site_column")]
    pub site_column: String,

    #[serde(default = "default_payload_column")]
    pub payload_column: String,

    #[serde(default = "default_outcome_column")]
    pub outcome_column: String,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/spacex_launch_dash.csv")
}

fn default_site_column() -> String {
    DEFAULT_SITE_COLUMN.to_string()
}

fn default_payload_column() -> String {
    DEFAULT_PAYLOAD_COLUMN.to_string()
}

fn default_outcome_column() -> String {
    DEFAULT_OUTCOME_COLUMN.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            site_column: default_site_column(),
            payload_column: default_payload_column(),
            outcome_column: default_outcome_column(),
        }
    }
}

impl DatasetConfig {
    /// Build a loader using the configured column names
    pub fn loader(&self) -> DatasetLoader {
        DatasetLoader::new()
            .with_site_column(&self.site_column)
            .with_payload_column(&self.payload_column)
            .with_outcome_column(&self.outcome_column)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of concurrent dashboard sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Granularity of the payload slider (kg)
    #[serde(default = "default_slider_step")]
    pub slider_step: f64,

    /// Distance between labelled slider marks (kg); 0 disables marks
    #[serde(default = "default_mark_interval")]
    pub mark_interval: u64,

    /// URL of the plotly.js bundle
    #[serde(default = "default_plotly_src")]
    pub plotly_src: String,
}

fn default_title() -> String {
    "SpaceX Launch Records Dashboard".to_string()
}

fn default_slider_step() -> f64 {
    100.0
}

fn default_mark_interval() -> u64 {
    1000
}

fn default_plotly_src() -> String {
    "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            slider_step: default_slider_step(),
            mark_interval: default_mark_interval(),
            plotly_src: default_plotly_src(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// First existing config file among the default locations
    pub fn default_path() -> Option<PathBuf> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("launch-dash").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        config_paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Load from the default location if one exists, else defaults
    ///
    /// Environment overrides apply either way. Returns the file used, if
    /// any. Runs before logging is set up, so it reports instead of logging.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        match Self::default_path() {
            Some(path) => Ok((Self::load_with_env(&path)?, Some(path))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment in production)
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("LAUNCH_DASH_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }

        if let Some(host) = lookup("LAUNCH_DASH_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("LAUNCH_DASH_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Some(level) = lookup("LAUNCH_DASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LAUNCH_DASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Launch Dashboard Configuration
#
# Environment variables override these settings:
# - LAUNCH_DASH_DATASET
# - LAUNCH_DASH_HOST
# - LAUNCH_DASH_PORT
# - LAUNCH_DASH_LOG_LEVEL
# - LAUNCH_DASH_LOG_FORMAT

[dataset]
# CSV file with one launch per row (read once at startup)
path = "data/spacex_launch_dash.csv"

# Header names of the required columns
site_column = "Launch Site"
payload_column = "Payload Mass (kg)"
outcome_column = "class"

[api]
# Server host
host = "127.0.0.1"

# Server port
port = 8050

# Maximum number of concurrent dashboard sessions
max_sessions = 1000

[dashboard]
# Page heading
title = "SpaceX Launch Records Dashboard"

# Payload slider granularity (kg)
slider_step = 100.0

# Distance between labelled slider marks (kg), 0 disables marks
mark_interval = 1000

# plotly.js bundle used by the browser
plotly_src = "https://cdn.plot.ly/plotly-2.35.2.min.js"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
