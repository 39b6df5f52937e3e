use crate::query::{
    ast::expr::Expr,
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::Wildcard => r.sql.push('*'),
        }
    }
}
