use crate::{
    batch_log::BatchLogger, driver::BatchDriver, error::DriverError, progress::RunSummary,
};
use connectors::sql::{
    base::error::DbError,
    mysql::{
        adapter::MySqlAdapter, destination::MySqlDataDestination, source::MySqlDataSource,
    },
};
use engine_config::settings::BackwashConfig;
use tracing::info;

/// Copies `source_table` into `backwash_table` as described by `config`.
pub async fn run(config: &BackwashConfig) -> Result<RunSummary, DriverError> {
    let source = MySqlDataSource::new(
        MySqlAdapter::new(config.source.clone()),
        &config.source_table,
        config.batch_size.get(),
    );
    let destination = MySqlDataDestination::new(
        MySqlAdapter::new(config.target.clone()),
        &config.backwash_table,
    );

    if let Some(dir) = &config.log_dir {
        info!("Writing per-offset logs to {}", dir.display());
    }

    let mut driver = BatchDriver::new(
        source,
        destination,
        config.batch_size.get(),
        config.max_offset,
        BatchLogger::new(config.log_dir.clone()),
    );

    driver.run().await
}

/// Pings both databases without touching any table.
pub async fn check_connections(config: &BackwashConfig) -> Result<(), DbError> {
    MySqlAdapter::new(config.source.clone()).ping().await?;
    MySqlAdapter::new(config.target.clone()).ping().await?;
    Ok(())
}
