//! Runtime configuration for front-ends embedding the core.
//!
//! # Invariants
//! - A validated config has a non-empty data path.
//! - A configured log directory is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "devtasks.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDataPath,
    RelativeLogDir(PathBuf),
    UnsupportedLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataPath => write!(f, "data path cannot be empty"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::UnsupportedLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Where state lives and how much gets logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file backing the key-value store.
    pub data_path: PathBuf,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl AppConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Checks the config and canonicalizes the log level.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataPath);
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        self.log_level = normalize_level(&self.log_level)
            .map_err(ConfigError::UnsupportedLevel)?
            .to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn validate_normalizes_level() {
        let config = AppConfig::new("tasks.db")
            .with_log_level(" WARNING ")
            .validate()
            .unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn validate_rejects_bad_inputs() {
        assert_eq!(
            AppConfig::new("").validate().unwrap_err(),
            ConfigError::EmptyDataPath
        );
        assert_eq!(
            AppConfig::new("tasks.db")
                .with_log_dir("logs")
                .validate()
                .unwrap_err(),
            ConfigError::RelativeLogDir(PathBuf::from("logs"))
        );
        assert!(matches!(
            AppConfig::new("tasks.db").with_log_level("loud").validate(),
            Err(ConfigError::UnsupportedLevel(_))
        ));
    }
}
