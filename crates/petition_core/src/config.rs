//! Runtime configuration for petition hosts.
//!
//! # Responsibility
//! - Resolve store location and logging settings from the environment.
//! - Let adapters (CLI) layer explicit overrides on top.
//!
//! # Invariants
//! - `log_level` is always a normalized level accepted by `init_logging`.
//! - `db_path = None` selects the in-memory store.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

/// Environment variable naming the SQLite database file.
pub const ENV_DB_PATH: &str = "PETITION_DB_PATH";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "PETITION_LOG_LEVEL";
/// Environment variable naming the absolute log directory.
pub const ENV_LOG_DIR: &str = "PETITION_LOG_DIR";

/// Resolved host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file; `None` keeps petitions in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to a value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let log_level = match non_blank(lookup(ENV_LOG_LEVEL)) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        Ok(Self {
            db_path: non_blank(lookup(ENV_DB_PATH)).map(PathBuf::from),
            log_level,
            log_dir: non_blank(lookup(ENV_LOG_DIR)).map(PathBuf::from),
        })
    }

    /// Applies explicit overrides; `None` keeps the current value.
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        log_level: Option<&str>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, String> {
        if db_path.is_some() {
            self.db_path = db_path;
        }
        if let Some(level) = log_level {
            self.log_level = normalize_level(level)?;
        }
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.db_path.is_none());
    }

    #[test]
    fn environment_values_are_trimmed_and_normalized() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, " /tmp/petitions.db "),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, "/var/log/petition"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/petitions.db")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/petition")));
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn overrides_win_over_environment() {
        let config = CoreConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "/tmp/a.db")]))
            .unwrap()
            .with_overrides(Some(PathBuf::from("/tmp/b.db")), Some("error"), None)
            .unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/b.db")));
        assert_eq!(config.log_level, "error");
    }
}
