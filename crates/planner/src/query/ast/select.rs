//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

use crate::query::ast::{common::TableRef, expr::Expr};
use model::core::value::Value;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The list of columns or expressions to be returned.
    pub columns: Vec<Expr>,

    /// The primary table for the query.
    pub from: Option<TableRef>,

    /// The LIMIT clause.
    pub limit: Option<Expr>,

    /// The OFFSET clause.
    pub offset: Option<Expr>,
}

impl Select {
    /// `SELECT * FROM <table> LIMIT <limit> OFFSET <offset>`, with limit and
    /// offset bound as parameters.
    pub fn page(table: TableRef, limit: u64, offset: u64) -> Self {
        Select {
            columns: vec![Expr::Wildcard],
            from: Some(table),
            limit: Some(Expr::Value(Value::Uint(limit))),
            offset: Some(Expr::Value(Value::Uint(offset))),
        }
    }
}
