use connectors::sql::base::error::DbError;
use engine_config::error::ConfigError;
use engine_core::error::DriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Connection check failed: {0}")]
    Check(#[from] DbError),

    #[error("Backwash failed: {0}")]
    Driver(#[from] DriverError),
}
