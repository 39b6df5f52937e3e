use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    /// A variable is set but does not parse as the expected type.
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The env file could not be read.
    #[error("Failed to read env file {}: {source}", path.display())]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The env file is not in `KEY=VALUE` form.
    #[error("Invalid env file: {0}")]
    EnvFileSyntax(String),
}
