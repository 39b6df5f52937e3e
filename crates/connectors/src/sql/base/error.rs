use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any MySQL driver error.
    #[error("SQL error: {0}")]
    Sql(#[from] mysql_async::Error),

    /// The connection could not be established.
    #[error("Connection error: {0}")]
    Connector(#[from] ConnectorError),

    /// Writing rows to the database failed at the application level.
    #[error("Write error: {0}")]
    Write(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The driver failed to open a connection to `{name}`.
    #[error("Failed to connect to {name} database at {target}: {source}")]
    Connect {
        name: String,
        target: String,
        #[source]
        source: mysql_async::Error,
    },

    /// The server answered the liveness probe with something unexpected.
    #[error("{name} database returned an unexpected ping result: {detail}")]
    Ping { name: String, detail: String },
}
