//! Compiler configuration.
//!
//! Scoped to the handful of tunables the compiler itself reads; the
//! database connection, server, and auth settings that a full `AppConfig`
//! would carry belong to the execution layer this crate does not provide.

use serde::{Deserialize, Serialize};

/// Compiler-wide defaults, overridable by an embedding application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Default `LIMIT` when the caller supplies no `limit` parameter.
    #[serde(default = "default_limit")]
    pub default_limit: i64,

    /// Column used for the default `ORDER BY` when the caller supplies no
    /// `sort` parameter.
    #[serde(default = "default_order_column")]
    pub default_order_column: String,

    /// Column bound against `start`/`-start` range predicates.
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Text search configuration passed to `to_tsquery`.
    #[serde(default = "default_search_language")]
    pub search_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_order_column: default_order_column(),
            id_column: default_id_column(),
            search_language: default_search_language(),
        }
    }
}

impl Config {
    /// Load configuration from `QUERYC_*` environment variables, falling
    /// back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("QUERYC_DEFAULT_LIMIT") {
            if let Ok(n) = v.parse() {
                cfg.default_limit = n;
            }
        }
        if let Ok(v) = std::env::var("QUERYC_ORDER_COLUMN") {
            cfg.default_order_column = v;
        }
        if let Ok(v) = std::env::var("QUERYC_ID_COLUMN") {
            cfg.id_column = v;
        }
        if let Ok(v) = std::env::var("QUERYC_SEARCH_LANGUAGE") {
            cfg.search_language = v;
        }

        cfg
    }
}

fn default_limit() -> i64 {
    10
}

fn default_order_column() -> String {
    "id".to_string()
}

fn default_id_column() -> String {
    "id".to_string()
}

fn default_search_language() -> String {
    "simple".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.default_limit, 10);
        assert_eq!(cfg.default_order_column, "id");
        assert_eq!(cfg.id_column, "id");
        assert_eq!(cfg.search_language, "simple");
    }
}
