//! Polymorphic parameter source.
//!
//! Every public entry point (`compile`, `filter`, `map`, `map_safe`) accepts
//! a raw query string or an already-decoded mapping interchangeably, so a
//! caller can pipe a query string through `filter` -> `map_safe` ->
//! `compile` without manually decoding it at each step.

use crate::error::Result;
use crate::qs::{decode_query_string, to_param_map};
use indexmap::IndexMap;
use queryc_sql::SqlParam;

/// A parameter source: a raw query string, a decoded string mapping, or an
/// already-typed mapping (the currency `compile` ultimately consumes).
pub enum ParamSource {
    QueryString(String),
    Strings(IndexMap<String, String>),
    Typed(IndexMap<String, SqlParam>),
}

impl ParamSource {
    /// Resolve to the decoded string mapping, decoding a query string if
    /// that's what this source holds. A typed mapping is rendered back to
    /// text; its values only ever originate as `SqlParam::Text` unless a
    /// caller fed `map`/`map_safe` output back in here, in which case
    /// non-text values round-trip through their SQL literal form.
    pub fn into_strings(self) -> Result<IndexMap<String, String>> {
        match self {
            ParamSource::QueryString(s) => decode_query_string(&s),
            ParamSource::Strings(m) => Ok(m),
            ParamSource::Typed(m) => Ok(m
                .into_iter()
                .map(|(k, v)| {
                    let text = match v {
                        SqlParam::Text(s) => s,
                        other => other.to_literal(),
                    };
                    (k, text)
                })
                .collect()),
        }
    }

    /// Resolve to the typed mapping `compile` consumes.
    pub fn into_typed(self) -> Result<IndexMap<String, SqlParam>> {
        match self {
            ParamSource::QueryString(s) => Ok(to_param_map(decode_query_string(&s)?)),
            ParamSource::Strings(m) => Ok(to_param_map(m)),
            ParamSource::Typed(m) => Ok(m),
        }
    }
}

impl From<&str> for ParamSource {
    fn from(s: &str) -> Self {
        ParamSource::QueryString(s.to_string())
    }
}

impl From<String> for ParamSource {
    fn from(s: String) -> Self {
        ParamSource::QueryString(s)
    }
}

impl From<IndexMap<String, String>> for ParamSource {
    fn from(m: IndexMap<String, String>) -> Self {
        ParamSource::Strings(m)
    }
}

impl From<IndexMap<String, SqlParam>> for ParamSource {
    fn from(m: IndexMap<String, SqlParam>) -> Self {
        ParamSource::Typed(m)
    }
}
