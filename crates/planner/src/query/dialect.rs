//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Keyword(s) placed between `INSERT` and `INTO` to skip rows that
    /// violate a unique key.
    fn insert_ignore_keyword(&self) -> &'static str;

    /// Upper bound on bound parameters in one prepared statement.
    fn max_placeholders(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn insert_ignore_keyword(&self) -> &'static str {
        "IGNORE"
    }

    fn max_placeholders(&self) -> usize {
        u16::MAX as usize
    }
}
