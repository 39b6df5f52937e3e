use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::records::page::Page;

/// Something that can hand out one page of source rows at a given offset.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches at most one batch of rows starting `offset` rows into the
    /// table. An empty page means the window held no rows.
    async fn fetch_page(&self, offset: u64) -> Result<Page, DbError>;

    /// The table rows are read from, for logging.
    fn table(&self) -> &str;
}
