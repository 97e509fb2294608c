//! SQL expression building.

use crate::{builder::SqlFragment, identifier::escape_ident, param::SqlParam};

/// A SQL boolean expression (for WHERE clauses).
///
/// Constructors take the left-hand side as already-safe SQL text (an
/// escaped identifier or a JSONB subscript expression); callers build that
/// text with [`escape_ident`] or [`column_ref`]/[`jsonb_ref`] before handing
/// it here, rather than Expr escaping a bare name itself, since the
/// left-hand side may be a plain column or a qualified/JSONB one.
#[derive(Clone, Debug)]
pub struct Expr {
    fragment: SqlFragment,
}

impl Expr {
    /// Create an expression from a SQL fragment.
    pub fn from_fragment(fragment: SqlFragment) -> Self {
        Self { fragment }
    }

    /// Create an expression from raw, already-safe SQL text with no bound
    /// parameters (e.g. `TRUE`, `FALSE`).
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            fragment: SqlFragment::raw(sql),
        }
    }

    /// `lhs <op> $n`, where `lhs` is already-safe SQL text.
    pub fn cmp(lhs: &str, op: &str, value: impl Into<SqlParam>) -> Self {
        let mut frag = SqlFragment::new();
        frag.push(lhs);
        frag.push(" ");
        frag.push(op);
        frag.push(" ");
        frag.push_param(value);
        Self { fragment: frag }
    }

    /// `lhs ILIKE $n`
    pub fn ilike(lhs: &str, pattern: impl Into<SqlParam>) -> Self {
        Self::cmp(lhs, "ILIKE", pattern)
    }

    /// `lhs IS NULL`
    pub fn is_null(lhs: &str) -> Self {
        Self {
            fragment: SqlFragment::raw(format!("{} IS NULL", lhs)),
        }
    }

    /// `lhs IS NOT NULL`
    pub fn is_not_null(lhs: &str) -> Self {
        Self {
            fragment: SqlFragment::raw(format!("{} IS NOT NULL", lhs)),
        }
    }

    /// `lhs = ANY($n)` bound against a single array parameter.
    pub fn in_list(lhs: &str, values: Vec<SqlParam>) -> Self {
        if values.is_empty() {
            return Self::raw("FALSE");
        }
        let mut frag = SqlFragment::new();
        frag.push(lhs);
        frag.push(" = ANY(");
        frag.push_param(SqlParam::Array(values));
        frag.push(")");
        Self { fragment: frag }
    }

    /// `lhs @@ to_tsquery(lang, $n)`
    pub fn fts(lhs: &str, query: impl Into<SqlParam>, language: &str) -> Self {
        let mut frag = SqlFragment::new();
        frag.push(lhs);
        frag.push(" @@ to_tsquery(");
        frag.push_param(language);
        frag.push(", ");
        frag.push_param(query);
        frag.push(")");
        Self { fragment: frag }
    }

    /// Combine with AND: self AND other
    pub fn and(self, other: Expr) -> Self {
        let mut frag = self.fragment.parens();
        frag.push(" AND ");
        frag.append(other.fragment.parens());
        Self { fragment: frag }
    }

    /// Combine multiple expressions with AND, starting from `TRUE`.
    pub fn and_all(exprs: impl IntoIterator<Item = Expr>) -> Self {
        let frags: Vec<_> = exprs.into_iter().map(|e| e.fragment.parens()).collect();
        if frags.is_empty() {
            return Self::raw("TRUE");
        }
        Self {
            fragment: SqlFragment::join(" AND ", frags),
        }
    }

    /// Convert to a SQL fragment.
    pub fn into_fragment(self) -> SqlFragment {
        self.fragment
    }

    /// Get the SQL string.
    pub fn sql(&self) -> &str {
        self.fragment.sql()
    }

    /// Get the parameters.
    pub fn params(&self) -> &[SqlParam] {
        self.fragment.params()
    }
}

/// Build the SQL text for a plain or alias-qualified column reference.
pub fn column_ref(alias: Option<&str>, column: &str) -> String {
    match alias {
        Some(a) => format!("{}.{}", escape_ident(a), escape_ident(column)),
        None => escape_ident(column),
    }
}

/// Build the SQL text for a (optionally alias-qualified) JSONB subscript:
/// `col ->> 'key'`.
pub fn jsonb_ref(alias: Option<&str>, column: &str, key: &str) -> String {
    format!(
        "{} ->> '{}'",
        column_ref(alias, column),
        key.replace('\'', "''")
    )
}

/// ORDER BY expression: a column plus direction.
#[derive(Clone, Debug)]
pub struct OrderExpr {
    column: String,
    desc: bool,
}

impl OrderExpr {
    /// Create a new ascending ORDER BY expression.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            desc: false,
        }
    }

    /// Set descending order.
    pub fn desc(mut self) -> Self {
        self.desc = true;
        self
    }

    /// Convert to SQL fragment.
    pub fn into_fragment(self) -> SqlFragment {
        let mut frag = SqlFragment::raw(escape_ident(&self.column));
        frag.push(if self.desc { " DESC" } else { " ASC" });
        frag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_cmp() {
        let expr = Expr::cmp(&column_ref(None, "name"), "=", "John");
        assert_eq!(expr.sql(), "\"name\" = $1");
        assert_eq!(expr.params().len(), 1);
    }

    #[test]
    fn test_expr_in_list() {
        let expr = Expr::in_list(
            &column_ref(None, "id"),
            vec![SqlParam::Int(1), SqlParam::Int(2), SqlParam::Int(3)],
        );
        assert_eq!(expr.sql(), "\"id\" = ANY($1)");
        assert_eq!(expr.params().len(), 1);
    }

    #[test]
    fn test_expr_is_null() {
        let expr = Expr::is_null(&column_ref(None, "deleted_at"));
        assert_eq!(expr.sql(), "\"deleted_at\" IS NULL");
    }

    #[test]
    fn test_expr_and() {
        let expr1 = Expr::cmp(&column_ref(None, "a"), "=", 1i64);
        let expr2 = Expr::cmp(&column_ref(None, "b"), "=", 2i64);
        let combined = expr1.and(expr2);

        assert!(combined.sql().contains(" AND "));
        assert_eq!(combined.params().len(), 2);
    }

    #[test]
    fn test_jsonb_ref() {
        assert_eq!(jsonb_ref(None, "options", "prompt"), "\"options\" ->> 'prompt'");
        assert_eq!(
            jsonb_ref(Some("current_version"), "options", "prompt"),
            "\"current_version\".\"options\" ->> 'prompt'"
        );
    }

    #[test]
    fn test_order_expr() {
        let order = OrderExpr::new("created_at").desc();
        let frag = order.into_fragment();
        assert_eq!(frag.sql(), "\"created_at\" DESC");
    }
}
