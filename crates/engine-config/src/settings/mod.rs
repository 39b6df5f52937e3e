use crate::{
    env::EnvManager,
    error::ConfigError,
    settings::{batch_size::BatchSize, connection::connection_from_env},
};
use model::execution::connection::Connection;
use std::path::PathBuf;
use tracing::info;

pub mod batch_size;
pub mod connection;

pub const TABLE_NAME: &str = "TABLE_NAME";
pub const BACKWASH_TABLE: &str = "BACKWASH_TABLE";
pub const BATCH_SIZE: &str = "BATCH_SIZE";
pub const MAX_OFFSET: &str = "MAX_OFFSET";
pub const LOG_DIR: &str = "BACKWASH_LOG_DIR";

/// Everything a run needs, read once at start-up.
#[derive(Debug, Clone)]
pub struct BackwashConfig {
    pub source: Connection,
    pub target: Connection,
    /// Table rows are read from.
    pub source_table: String,
    /// Table rows are copied into.
    pub backwash_table: String,
    pub batch_size: BatchSize,
    /// Exclusive upper bound on the offset cursor.
    pub max_offset: u64,
    /// Directory for per-offset log files, when enabled.
    pub log_dir: Option<PathBuf>,
}

impl BackwashConfig {
    pub fn from_env(env: &EnvManager) -> Result<Self, ConfigError> {
        let config = BackwashConfig {
            source: connection_from_env(env, "source", "SOURCE")?,
            target: connection_from_env(env, "target", "TARGET")?,
            source_table: env.require(TABLE_NAME)?.to_string(),
            backwash_table: env.require(BACKWASH_TABLE)?.to_string(),
            batch_size: BatchSize::parse(env.require(BATCH_SIZE)?)?,
            max_offset: parse_u64(MAX_OFFSET, env.require(MAX_OFFSET)?)?,
            log_dir: env
                .get(LOG_DIR)
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        };

        info!(
            "Loaded configuration: {} ({}) -> {} ({}), batch size {}, max offset {}",
            config.source_table,
            config.source,
            config.backwash_table,
            config.target,
            config.batch_size,
            config.max_offset
        );

        Ok(config)
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        self
    }
}

pub(crate) fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|err| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SOURCE_DB_IP", "10.0.0.5"),
            ("SOURCE_DB_PORT", "3306"),
            ("SOURCE_DB_USER", "reader"),
            ("SOURCE_DB_PASS", "r3ad"),
            ("SOURCE_DBNAME", "population"),
            ("TARGET_DB_IP", "10.0.0.9"),
            ("TARGET_DB_PORT", "3307"),
            ("TARGET_DB_USER", "writer"),
            ("TARGET_DB_PASS", "wr1te"),
            ("TARGET_DBNAME", "warehouse"),
            ("TABLE_NAME", "citizens"),
            ("BACKWASH_TABLE", "citizens_backwash"),
            ("BATCH_SIZE", "100"),
            ("MAX_OFFSET", "300"),
        ]
    }

    fn env_without(key: &str) -> EnvManager {
        EnvManager::from_vars(full_env().into_iter().filter(|(k, _)| *k != key))
    }

    #[test]
    fn test_from_env() {
        let config = BackwashConfig::from_env(&EnvManager::from_vars(full_env())).unwrap();

        assert_eq!(config.source.host, "10.0.0.5");
        assert_eq!(config.source.port, 3306);
        assert_eq!(config.source.database, "population");
        assert_eq!(config.target.port, 3307);
        assert_eq!(config.target.user, "writer");
        assert_eq!(config.source_table, "citizens");
        assert_eq!(config.backwash_table, "citizens_backwash");
        assert_eq!(config.batch_size.get(), 100);
        assert_eq!(config.max_offset, 300);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_missing_var_is_named() {
        let err = BackwashConfig::from_env(&env_without("BACKWASH_TABLE")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ref k) if k == "BACKWASH_TABLE"));
    }

    #[test]
    fn test_malformed_max_offset() {
        let mut vars = full_env();
        vars.retain(|(k, _)| *k != "MAX_OFFSET");
        vars.push(("MAX_OFFSET", "lots"));

        let err = BackwashConfig::from_env(&EnvManager::from_vars(vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "MAX_OFFSET"));
    }

    #[test]
    fn test_log_dir_from_env_and_override() {
        let mut vars = full_env();
        vars.push(("BACKWASH_LOG_DIR", "/var/log/backwash"));
        let config = BackwashConfig::from_env(&EnvManager::from_vars(vars)).unwrap();
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/backwash")));

        let config = config.with_log_dir(Some(PathBuf::from("logs")));
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));

        let config = config.with_log_dir(None);
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }
}
