//! Constraint compiler.
//!
//! Maps `(field reference, operator, value)` to a predicate [`Expr`] for
//! the root entity or for a joined association's alias, per the operator
//! table in the module docs.
//!
//! | Op | Plain field | JSONB field |
//! |----|-------------|-------------|
//! | `eq` | `f = ?` | `col->>key = ?` |
//! | `neq` | `f <> ?` | not supported |
//! | `gt`,`gte`,`lt`,`lte` | `f <cmp> ?` | not supported |
//! | `contains` | `f ILIKE '%?%'` | `col->>key ILIKE '%?%'` |
//! | `starts_with` | `f ILIKE '?%'` | `col->>key ILIKE '?%'` |
//! | `ends_with` | `f ILIKE '%?'` | `col->>key ILIKE '%?'` |
//! | `true`/`false` | `f = TRUE`/`FALSE` | not supported |
//! | `nil` | `f IS [NOT] NULL` | not supported |
//! | `in` | `f = ANY(?)` | not supported |
//! | `search` | `f @@ to_tsquery(lang, ?)` | not supported |

use crate::error::{Error, Result};
use crate::operator::Operator;
use queryc_sql::{column_ref, jsonb_ref, Expr, SqlParam};
use std::convert::TryFrom;

/// Compile a predicate against a plain (non-JSONB) column, optionally
/// qualified by a join alias.
pub fn compile_plain(
    alias: Option<&str>,
    field: &str,
    op: &str,
    value: &SqlParam,
    search_language: &str,
) -> Result<Expr> {
    let lhs = column_ref(alias, field);
    compile_for_lhs(&lhs, op, value, search_language, true)
}

/// Compile a predicate against a JSONB subscript, optionally qualified by
/// a join alias. Only the operators explicitly listed in the table above
/// are supported; anything else (including `neq`) is an
/// [`Error::InvalidConstraint`], per the open question on widening the
/// JSONB operator set.
pub fn compile_jsonb(
    alias: Option<&str>,
    field: &str,
    key: &str,
    op: &str,
    value: &SqlParam,
) -> Result<Expr> {
    let lhs = jsonb_ref(alias, field, key);
    compile_for_lhs(&lhs, op, value, "simple", false)
}

fn compile_for_lhs(
    lhs: &str,
    op: &str,
    value: &SqlParam,
    search_language: &str,
    supports_full_table: bool,
) -> Result<Expr> {
    let operator = Operator::try_from(op)?;

    match operator {
        Operator::Eq => Ok(Expr::cmp(lhs, "=", value.clone())),
        Operator::Contains => Ok(Expr::ilike(lhs, wrap_pattern(value, true, true))),
        Operator::StartsWith => Ok(Expr::ilike(lhs, wrap_pattern(value, false, true))),
        Operator::EndsWith => Ok(Expr::ilike(lhs, wrap_pattern(value, true, false))),
        _ if !supports_full_table => Err(Error::InvalidConstraint(op.to_string())),
        Operator::Neq => Ok(Expr::cmp(lhs, "<>", value.clone())),
        Operator::Gt => Ok(Expr::cmp(lhs, ">", value.clone())),
        Operator::Gte => Ok(Expr::cmp(lhs, ">=", value.clone())),
        Operator::Lt => Ok(Expr::cmp(lhs, "<", value.clone())),
        Operator::Lte => Ok(Expr::cmp(lhs, "<=", value.clone())),
        Operator::True => Ok(Expr::cmp(lhs, "=", SqlParam::Bool(true))),
        Operator::False => Ok(Expr::cmp(lhs, "=", SqlParam::Bool(false))),
        Operator::Nil => {
            if is_truthy(value) {
                Ok(Expr::is_null(lhs))
            } else {
                Ok(Expr::is_not_null(lhs))
            }
        }
        Operator::In => {
            let values = tokenize_in(value);
            Ok(Expr::in_list(lhs, values))
        }
        Operator::Search => {
            let tokens = search_tokens(value);
            Ok(Expr::fts(lhs, SqlParam::Text(tokens), search_language))
        }
    }
}

fn wrap_pattern(value: &SqlParam, leading: bool, trailing: bool) -> SqlParam {
    let text = match value {
        SqlParam::Text(s) => s.clone(),
        other => other.to_literal(),
    };
    let mut pattern = String::with_capacity(text.len() + 2);
    if leading {
        pattern.push('%');
    }
    pattern.push_str(&text);
    if trailing {
        pattern.push('%');
    }
    SqlParam::Text(pattern)
}

fn is_truthy(value: &SqlParam) -> bool {
    matches!(value, SqlParam::Bool(true)) || matches!(value, SqlParam::Text(s) if s == "true")
}

/// Split an `in` value on `,` with no further coercion.
fn tokenize_in(value: &SqlParam) -> Vec<SqlParam> {
    match value {
        SqlParam::Text(s) => s.split(',').map(|tok| SqlParam::Text(tok.to_string())).collect(),
        other => vec![other.clone()],
    }
}

/// Split on whitespace, append `:*` to each token, join with ` & `.
fn search_tokens(value: &SqlParam) -> String {
    let text = match value {
        SqlParam::Text(s) => s.clone(),
        other => other.to_literal(),
    };
    text.split_whitespace()
        .filter(|tok| !tok.is_empty())
        .map(|tok| format!("{tok}:*"))
        .collect::<Vec<_>>()
        .join(" & ")
}
