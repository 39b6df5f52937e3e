use crate::sql::{
    base::{
        destination::{PageSink, WriteOutcome},
        error::DbError,
    },
    mysql::{adapter::MySqlAdapter, params::MySqlParamStore},
};
use async_trait::async_trait;
use model::{core::value::Value, records::page::Page};
use mysql_async::{Conn, TxOpts, prelude::*};
use planner::query::{
    ast::{common::TableRef, expr::Expr, insert::Insert},
    dialect::{self, Dialect},
    renderer::render,
};
use tracing::debug;

/// Writes pages into the backwash table with `INSERT IGNORE`.
#[derive(Clone)]
pub struct MySqlDataDestination {
    adapter: MySqlAdapter,
    table: String,
}

impl MySqlDataDestination {
    pub fn new(adapter: MySqlAdapter, table: &str) -> Self {
        Self {
            adapter,
            table: table.to_string(),
        }
    }

    /// Builds the insert statements for `page`. Rows are split across
    /// statements only when one statement would exceed the server's
    /// placeholder limit.
    pub fn insert_statements(&self, page: &Page) -> Result<Vec<(String, Vec<Value>)>, DbError> {
        if page.columns.is_empty() {
            return Err(DbError::Write(format!(
                "page at offset {} has {} rows but no columns",
                page.offset,
                page.len()
            )));
        }

        let dialect = dialect::MySql;
        let rows_per_statement = (dialect.max_placeholders() / page.columns.len()).max(1);
        let table = TableRef::parse(&self.table);

        let statements = page
            .rows
            .chunks(rows_per_statement)
            .map(|chunk| {
                let values = chunk
                    .iter()
                    .map(|row| {
                        page.columns
                            .iter()
                            .map(|col| Expr::Value(row.get_value(col)))
                            .collect()
                    })
                    .collect();

                let insert = Insert {
                    table: table.clone(),
                    columns: page.columns.clone(),
                    values,
                    ignore_conflicts: true,
                };
                render(&insert, &dialect)
            })
            .collect();

        Ok(statements)
    }
}

#[async_trait]
impl PageSink for MySqlDataDestination {
    async fn write_page(&self, page: &Page) -> Result<WriteOutcome, DbError> {
        if page.is_empty() {
            return Ok(WriteOutcome::skipped());
        }

        let statements = self.insert_statements(page)?;

        let mut conn = self.adapter.connect().await?;
        let result = insert_all(&mut conn, statements).await;
        let inserted = self.adapter.close_with(conn, result).await?;

        Ok(WriteOutcome::inserted(inserted))
    }

    fn table(&self) -> &str {
        &self.table
    }
}

/// Runs `statements` in one transaction and sums the affected rows. A failed
/// statement rolls the transaction back when it is dropped.
async fn insert_all(
    conn: &mut Conn,
    statements: Vec<(String, Vec<Value>)>,
) -> Result<u64, DbError> {
    let mut inserted = 0u64;
    let mut tx = conn.start_transaction(TxOpts::default()).await?;
    for (sql, params) in statements {
        debug!("Generated SQL: {} ({} params)", sql, params.len());
        tx.exec_drop(sql, MySqlParamStore::from_values(&params).params())
            .await?;
        inserted += tx.affected_rows();
    }
    tx.commit().await?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::value::FieldValue, execution::connection::Connection, records::row::RowData,
    };

    fn destination() -> MySqlDataDestination {
        let adapter = MySqlAdapter::new(Connection {
            name: "target".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "writer".to_string(),
            password: "secret".to_string(),
            database: "backwash".to_string(),
        });
        MySqlDataDestination::new(adapter, "citizens_backwash")
    }

    fn page(rows: usize, columns: &[&str]) -> Page {
        let rows = (0..rows)
            .map(|i| {
                RowData::new(
                    "citizens",
                    columns
                        .iter()
                        .map(|c| FieldValue::new(c, Value::Int(i as i64)))
                        .collect(),
                )
            })
            .collect();
        Page::new(
            "citizens",
            0,
            columns.iter().map(|c| c.to_string()).collect(),
            rows,
        )
    }

    #[test]
    fn test_single_statement_covers_page_columns() {
        let statements = destination()
            .insert_statements(&page(2, &["nik", "status"]))
            .unwrap();

        assert_eq!(statements.len(), 1);
        let (sql, params) = &statements[0];
        assert_eq!(
            sql,
            "INSERT IGNORE INTO `citizens_backwash` (`nik`, `status`) VALUES (?, ?), (?, ?)"
        );
        assert_eq!(
            params,
            &vec![Value::Int(0), Value::Int(0), Value::Int(1), Value::Int(1)]
        );
    }

    #[test]
    fn test_large_page_is_split_under_placeholder_limit() {
        // 3 columns * 30_000 rows = 90_000 placeholders, over the 65_535 cap.
        let statements = destination()
            .insert_statements(&page(30_000, &["a", "b", "c"]))
            .unwrap();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].1.len(), 21_845 * 3);
        assert_eq!(statements[1].1.len(), (30_000 - 21_845) * 3);
    }

    #[test]
    fn test_rows_without_columns_is_an_error() {
        let mut p = page(1, &["nik"]);
        p.columns.clear();
        assert!(matches!(
            destination().insert_statements(&p),
            Err(DbError::Write(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_page_does_no_work() {
        let outcome = destination()
            .write_page(&Page::empty("citizens", 500))
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::skipped());
    }
}
