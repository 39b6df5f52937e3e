use crate::sql::{
    base::{error::DbError, source::PageSource},
    mysql::{
        adapter::MySqlAdapter,
        params::MySqlParamStore,
        row::{column_names, to_row_data},
    },
};
use async_trait::async_trait;
use model::records::page::Page;
use mysql_async::{Row, prelude::*};
use planner::query::{
    ast::{common::TableRef, select::Select},
    dialect,
    renderer::render,
};
use std::time::Instant;
use tracing::debug;

/// Reads the source table one `LIMIT`/`OFFSET` window at a time.
#[derive(Clone)]
pub struct MySqlDataSource {
    /// The MySQL adapter used to interact with the database.
    adapter: MySqlAdapter,

    /// Table name as configured, e.g. `citizens` or `archive.citizens`.
    table: String,

    /// Rows requested per page.
    batch_size: u64,
}

impl MySqlDataSource {
    pub fn new(adapter: MySqlAdapter, table: &str, batch_size: u64) -> Self {
        Self {
            adapter,
            table: table.to_string(),
            batch_size,
        }
    }

    /// The SQL and bound parameters for the page at `offset`.
    pub fn page_query(&self, offset: u64) -> (String, MySqlParamStore) {
        let select = Select::page(TableRef::parse(&self.table), self.batch_size, offset);
        let (sql, params) = render(&select, &dialect::MySql);
        (sql, MySqlParamStore::from_values(&params))
    }
}

#[async_trait]
impl PageSource for MySqlDataSource {
    async fn fetch_page(&self, offset: u64) -> Result<Page, DbError> {
        let start = Instant::now();
        let (sql, params) = self.page_query(offset);
        debug!("Generated SQL: {}", sql);

        let mut conn = self.adapter.connect().await?;
        let result = conn
            .exec::<Row, _, _>(sql, params.params())
            .await
            .map_err(DbError::from);
        let rows = self.adapter.close_with(conn, result).await?;

        let columns = rows.first().map(column_names).unwrap_or_default();
        let rows = rows
            .iter()
            .map(|row| to_row_data(&self.table, row))
            .collect::<Vec<_>>();

        let page = Page::new(&self.table, offset, columns, rows);
        debug!(
            "Fetched {} rows ({} bytes) from {} at offset {} in {}ms",
            page.len(),
            page.size_bytes(),
            self.table,
            offset,
            start.elapsed().as_millis()
        );

        Ok(page)
    }

    fn table(&self) -> &str {
        &self.table
    }
}
