use crate::sql::base::error::{ConnectorError, DbError};
use model::execution::connection::Connection;
use mysql_async::{Conn, Opts, OptsBuilder, prelude::*};
use tracing::{debug, info, warn};

/// Opens short-lived connections to one MySQL database.
///
/// Nothing is pooled: every call to [`MySqlAdapter::connect`] dials a new
/// connection and the caller is expected to disconnect it when the page is
/// done.
#[derive(Clone)]
pub struct MySqlAdapter {
    connection: Connection,
    opts: Opts,
}

impl MySqlAdapter {
    pub fn new(connection: Connection) -> Self {
        let opts = OptsBuilder::default()
            .ip_or_hostname(connection.host.clone())
            .tcp_port(connection.port)
            .user(Some(connection.user.clone()))
            .pass(Some(connection.password.clone()))
            .db_name(Some(connection.database.clone()));

        MySqlAdapter {
            connection,
            opts: Opts::from(opts),
        }
    }

    pub async fn connect(&self) -> Result<Conn, ConnectorError> {
        debug!(
            "Connecting to {} database at {}",
            self.connection.name, self.connection
        );
        Conn::new(self.opts.clone())
            .await
            .map_err(|source| ConnectorError::Connect {
                name: self.connection.name.clone(),
                target: self.connection.to_string(),
                source,
            })
    }

    /// Closes `conn`, reporting any error from the server goodbye.
    pub async fn disconnect(&self, conn: Conn) -> Result<(), DbError> {
        conn.disconnect().await?;
        Ok(())
    }

    /// Closes `conn` whether or not `outcome` succeeded, then returns it.
    pub async fn close_with<T>(
        &self,
        conn: Conn,
        outcome: Result<T, DbError>,
    ) -> Result<T, DbError> {
        let closed = self.disconnect(conn).await;
        settle(outcome, closed)
    }

    /// Runs `SELECT 1` over a fresh connection.
    pub async fn ping(&self) -> Result<(), DbError> {
        info!("Pinging {} database at {}", self.connection.name, self.connection);

        let mut conn = self.connect().await?;
        let result = conn
            .query_first::<i32, _>("SELECT 1")
            .await
            .map_err(DbError::from);
        let val: Option<i32> = self.close_with(conn, result).await?;

        match val {
            Some(1) => {
                info!("{} database ping succeeded", self.connection.name);
                Ok(())
            }
            other => Err(ConnectorError::Ping {
                name: self.connection.name.clone(),
                detail: format!("{other:?}"),
            }
            .into()),
        }
    }
}

/// The work's error wins over a failed disconnect; a failed disconnect after
/// successful work is still reported.
fn settle<T>(outcome: Result<T, DbError>, closed: Result<(), DbError>) -> Result<T, DbError> {
    match (outcome, closed) {
        (Err(err), Err(close_err)) => {
            warn!("Failed to close connection after error: {}", close_err);
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Ok(value), Ok(())) => Ok(value),
    }
}
