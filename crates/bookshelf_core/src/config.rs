//! Runtime configuration for the hosting process.
//!
//! # Invariants
//! - A validated config always has a supported log level.
//! - A configured log directory is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Value that selects a private in-memory database.
pub const MEMORY_DB: &str = ":memory:";

/// Which SQLite database the catalog lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// Fresh, private database discarded when the connection closes.
    Memory,
    File(PathBuf),
}

impl DbLocation {
    /// Parses `:memory:` (or an empty value) as memory, anything else as a path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == MEMORY_DB {
            Self::Memory
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl Display for DbLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "{MEMORY_DB}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    UnsupportedLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db: DbLocation,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    /// Run the fixture seed once after the store opens.
    pub seed_on_startup: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db: DbLocation::Memory,
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed_on_startup: true,
        }
    }
}

impl CatalogConfig {
    /// Checks values that would otherwise fail later during startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level).map_err(ConfigError::UnsupportedLogLevel)?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, ConfigError, DbLocation};
    use std::path::PathBuf;

    #[test]
    fn parse_recognizes_memory_and_paths() {
        assert_eq!(DbLocation::parse(":memory:"), DbLocation::Memory);
        assert_eq!(DbLocation::parse(""), DbLocation::Memory);
        assert_eq!(
            DbLocation::parse(" catalog.db "),
            DbLocation::File(PathBuf::from("catalog.db"))
        );
    }

    #[test]
    fn default_config_is_valid_and_seeds() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.seed_on_startup);
        assert_eq!(config.db, DbLocation::Memory);
    }

    #[test]
    fn validate_rejects_bad_level_and_relative_log_dir() {
        let bad_level = CatalogConfig {
            log_level: "loud".to_string(),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            bad_level.validate(),
            Err(ConfigError::UnsupportedLogLevel(_))
        ));

        let relative_dir = CatalogConfig {
            log_dir: Some(PathBuf::from("logs")),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            relative_dir.validate(),
            Err(ConfigError::RelativeLogDir(_))
        ));
    }
}
