use crate::records::row::RowData;

/// One window of source rows fetched with `LIMIT`/`OFFSET`.
///
/// `columns` is the column list reported by the result set, in order. The
/// writer inserts exactly these columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub table: String,
    pub offset: u64,
    pub columns: Vec<String>,
    pub rows: Vec<RowData>,
}

impl Page {
    pub fn new(table: &str, offset: u64, columns: Vec<String>, rows: Vec<RowData>) -> Self {
        Page {
            table: table.to_string(),
            offset,
            columns,
            rows,
        }
    }

    pub fn empty(table: &str, offset: u64) -> Self {
        Page::new(table, offset, Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn size_bytes(&self) -> usize {
        self.rows.iter().map(|r| r.size_bytes()).sum()
    }
}
