//! SELECT statement builder.
//!
//! The compiler only ever needs to assemble reads: `SELECT * FROM entity
//! [INNER JOIN assoc ...] WHERE ... ORDER BY ... LIMIT n`. There is no
//! mutation builder here because mutation is out of scope.

use crate::{
    builder::SqlFragment,
    expr::{Expr, OrderExpr},
    identifier::escape_ident,
};

/// Builder for SELECT statements.
#[derive(Clone, Debug, Default)]
pub struct SelectBuilder {
    from: Option<String>,
    joins: Vec<(String, String)>,
    where_clauses: Vec<SqlFragment>,
    order_by: Option<SqlFragment>,
    limit: Option<i64>,
}

impl SelectBuilder {
    /// Create a new SELECT builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the FROM entity.
    pub fn from_table(mut self, name: &str) -> Self {
        self.from = Some(name.to_string());
        self
    }

    /// Add an INNER JOIN against an association, used both as the joined
    /// table name and its alias.
    pub fn inner_join(mut self, assoc: &str) -> Self {
        self.joins.push((assoc.to_string(), assoc.to_string()));
        self
    }

    /// Add a WHERE clause; multiple calls AND-compose.
    pub fn where_expr(mut self, expr: Expr) -> Self {
        self.where_clauses.push(expr.into_fragment());
        self
    }

    /// Set ORDER BY.
    pub fn order_by(mut self, expr: OrderExpr) -> Self {
        self.order_by = Some(expr.into_fragment());
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Build the SELECT statement.
    pub fn build(self) -> SqlFragment {
        let mut result = SqlFragment::new();
        result.push("SELECT * FROM ");
        result.push(&escape_ident(self.from.as_deref().unwrap_or("")));

        for (table, alias) in &self.joins {
            result.push(" INNER JOIN ");
            result.push(&escape_ident(table));
            result.push(" AS ");
            result.push(&escape_ident(alias));
            result.push(" ON TRUE");
        }

        result.push(" WHERE TRUE");
        for clause in self.where_clauses {
            result.push(" AND ");
            result.append(clause);
        }

        if let Some(order) = self.order_by {
            result.push(" ORDER BY ");
            result.append(order);
        }

        if let Some(limit) = self.limit {
            result.push(" LIMIT ");
            result.push(&limit.to_string());
        }

        result
    }
}
