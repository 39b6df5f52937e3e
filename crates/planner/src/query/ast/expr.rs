//! Defines the AST for SQL expressions.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A value bound as a positional parameter.
    Value(Value),

    /// The `*` projection.
    Wildcard,
}
