use connectors::sql::base::error::DbError;
use thiserror::Error;

/// Reasons a copy run aborts. Every variant carries the offset of the page
/// that was being processed.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to fetch page at offset {offset}: {source}")]
    Fetch {
        offset: u64,
        #[source]
        source: DbError,
    },

    #[error("Failed to write page at offset {offset}: {source}")]
    Write {
        offset: u64,
        #[source]
        source: DbError,
    },

    #[error("Failed to write batch log for offset {offset}: {source}")]
    Log {
        offset: u64,
        #[source]
        source: std::io::Error,
    },
}

impl DriverError {
    pub fn offset(&self) -> u64 {
        match self {
            DriverError::Fetch { offset, .. }
            | DriverError::Write { offset, .. }
            | DriverError::Log { offset, .. } => *offset,
        }
    }
}
