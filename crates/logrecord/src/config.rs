//! Configuration loading and validation

use crate::output::OutputMode;
use crate::trace::{DEFAULT_TRACE_HEADER, is_valid_header_name};
use common::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found in search paths")]
    FileNotFound,

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub record: RecordConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.record.validate()
    }
}

/// Fields that stay fixed for the lifetime of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RecordConfig {
    /// Main project name (e.g. Rails/IST)
    pub project_name: String,

    /// Deployment environment (e.g. dev, uat, prod)
    pub environment: String,

    /// Module name (e.g. Treasury Service)
    pub module: String,

    /// Function name (e.g. SaveCardHolderData)
    pub function_name: String,

    /// Render mode selected at initialization
    pub output_mode: OutputMode,

    /// Header the trace id is read from
    #[validate(custom = "validate_header_name")]
    pub trace_header: String,
}

impl RecordConfig {
    pub fn new(
        project_name: impl Into<String>,
        environment: impl Into<String>,
        module: impl Into<String>,
        function_name: impl Into<String>,
        output_mode: OutputMode,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            environment: environment.into(),
            module: module.into(),
            function_name: function_name.into(),
            output_mode,
            trace_header: DEFAULT_TRACE_HEADER.to_string(),
        }
    }

    /// Read the trace id from `header` instead of the X-Ray header.
    pub fn with_trace_header(mut self, header: impl Into<String>) -> Self {
        self.trace_header = header.into();
        self
    }
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self::new("", "", "", "", OutputMode::default())
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

impl LoggingSettings {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn format(&self) -> LogFormat {
        self.format.unwrap_or_default()
    }
}

fn validate_header_name(name: &str) -> Result<(), ValidationError> {
    if !is_valid_header_name(name.trim()) {
        return Err(ValidationError::new("trace_header_invalid"));
    }
    Ok(())
}

impl Config {
    /// Load configuration from default search paths
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(&path)
            }
            None => {
                tracing::info!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound);
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/logrecord/logrecord.yaml")];

        if let Some(home_path) = Self::home_config_path() {
            paths.push(home_path);
        }

        paths.push(PathBuf::from("./logrecord.yaml"));

        paths.into_iter().find(|p: &PathBuf| p.is_file())
    }

    fn home_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/logrecord/logrecord.yaml"))
    }
}
