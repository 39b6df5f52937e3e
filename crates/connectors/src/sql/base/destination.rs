use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::records::page::Page;

/// Result of handing a page to a [`PageSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// `false` when the sink had nothing to do and never touched the database.
    pub attempted: bool,
    /// Rows actually inserted; duplicates skipped by the server are excluded.
    pub inserted: u64,
}

impl WriteOutcome {
    pub fn skipped() -> Self {
        WriteOutcome {
            attempted: false,
            inserted: 0,
        }
    }

    pub fn inserted(rows: u64) -> Self {
        WriteOutcome {
            attempted: true,
            inserted: rows,
        }
    }
}

#[async_trait]
pub trait PageSink: Send + Sync {
    /// Inserts every row of `page`, silently skipping rows that collide with
    /// a unique key in the target table.
    async fn write_page(&self, page: &Page) -> Result<WriteOutcome, DbError>;

    /// The table rows are written to, for logging.
    fn table(&self) -> &str;
}
