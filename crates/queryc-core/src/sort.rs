//! Sort & paginator.
//!
//! Produces the `ORDER BY`, `LIMIT`, and range (`start`/`-start`)
//! fragments from the reserved control parameters.

use crate::config::Config;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use queryc_sql::{column_ref, Expr, OrderExpr};

/// Resolve the `ORDER BY` expression from `sort`. Absent, empty, or
/// missing → `ORDER BY <default_order_column> ASC`. A leading `-`
/// selects descending order.
pub fn resolve_order(params: &IndexMap<String, String>, cfg: &Config) -> OrderExpr {
    match params.get("sort").map(String::as_str) {
        Some(s) if !s.is_empty() => {
            if let Some(field) = s.strip_prefix('-') {
                OrderExpr::new(field).desc()
            } else {
                OrderExpr::new(s)
            }
        }
        _ => OrderExpr::new(&cfg.default_order_column),
    }
}

/// Resolve `LIMIT`. Absent → `default_limit`. A non-integer string value
/// is an [`Error::InvalidQueryParam`].
pub fn resolve_limit(params: &IndexMap<String, String>, cfg: &Config) -> Result<i64> {
    match params.get("limit") {
        None => Ok(cfg.default_limit),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| Error::InvalidQueryParam(format!("limit={s}"))),
    }
}

/// Resolve the `start`/`-start` range predicate, if any.
///
/// `start=V` adds `id > V`; `-start=V` adds `id < V`. Exactly one of the
/// two may be present: both present is reported as
/// [`Error::AmbiguousRange`] rather than silently favoring one.
pub fn resolve_range(params: &IndexMap<String, String>, cfg: &Config) -> Result<Option<Expr>> {
    let start = params.get("start");
    let neg_start = params.get("-start");

    match (start, neg_start) {
        (Some(_), Some(_)) => Err(Error::AmbiguousRange),
        (Some(v), None) => {
            let bound: i64 = v
                .parse()
                .map_err(|_| Error::InvalidQueryParam(format!("start={v}")))?;
            Ok(Some(Expr::cmp(&column_ref(None, &cfg.id_column), ">", bound)))
        }
        (None, Some(v)) => {
            let bound: i64 = v
                .parse()
                .map_err(|_| Error::InvalidQueryParam(format!("-start={v}")))?;
            Ok(Some(Expr::cmp(&column_ref(None, &cfg.id_column), "<", bound)))
        }
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_default_order() {
        let cfg = Config::default();
        let order = resolve_order(&IndexMap::new(), &cfg);
        assert_eq!(order.into_fragment().sql(), "\"id\" ASC");
    }

    #[test]
    fn test_descending_order() {
        let cfg = Config::default();
        let order = resolve_order(&params(&[("sort", "-age")]), &cfg);
        assert_eq!(order.into_fragment().sql(), "\"age\" DESC");
    }

    #[test]
    fn test_default_limit() {
        let cfg = Config::default();
        assert_eq!(resolve_limit(&IndexMap::new(), &cfg).unwrap(), 10);
    }

    #[test]
    fn test_invalid_limit() {
        let cfg = Config::default();
        let err = resolve_limit(&params(&[("limit", "abc")]), &cfg).unwrap_err();
        assert_eq!(err, Error::InvalidQueryParam("limit=abc".into()));
    }

    #[test]
    fn test_range_start() {
        let cfg = Config::default();
        let expr = resolve_range(&params(&[("start", "5")]), &cfg).unwrap().unwrap();
        assert_eq!(expr.sql(), "\"id\" > $1");
    }

    #[test]
    fn test_range_ambiguous() {
        let cfg = Config::default();
        let err =
            resolve_range(&params(&[("start", "5"), ("-start", "9")]), &cfg).unwrap_err();
        assert_eq!(err, Error::AmbiguousRange);
    }
}
