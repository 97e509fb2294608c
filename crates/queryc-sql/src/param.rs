//! Bound SQL parameter values.

/// A value bound into a [`SqlFragment`](crate::SqlFragment) placeholder.
///
/// This is also the currency of the value mapper (`map`/`map_safe`): a
/// transformer receives one of these and returns one of these.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Text string
    Text(String),
    /// Array of parameters, bound as a single Postgres array value.
    Array(Vec<SqlParam>),
}

impl SqlParam {
    /// Create a text parameter.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create an integer parameter.
    pub fn int(n: i64) -> Self {
        Self::Int(n)
    }

    /// Check if this is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is an empty string, the other condition (alongside
    /// NULL) that `map_safe` treats as "no value supplied".
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Get the PostgreSQL type name for this parameter.
    pub fn pg_type(&self) -> &'static str {
        match self {
            Self::Null => "unknown",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "bigint",
            Self::Float(_) => "double precision",
            Self::Text(_) => "text",
            Self::Array(arr) => match arr.first() {
                Some(Self::Text(_)) => "text[]",
                Some(Self::Int(_)) => "bigint[]",
                Some(Self::Bool(_)) => "boolean[]",
                _ => "text[]",
            },
        }
    }

    /// Render this value as a SQL literal, for the inline/debug rendering
    /// of a compiled query. Never used for the executable form.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => crate::identifier::quote_literal(s),
            Self::Array(items) => {
                let rendered: Vec<String> = items.iter().map(SqlParam::to_literal).collect();
                format!("({})", rendered.join(", "))
            }
        }
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i32> for SqlParam {
    fn from(n: i32) -> Self {
        Self::Int(n as i64)
    }
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for SqlParam {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for SqlParam {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for SqlParam {
    fn from(v: Vec<String>) -> Self {
        Self::Array(v.into_iter().map(SqlParam::Text).collect())
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_param_types() {
        assert_eq!(SqlParam::text("hello").pg_type(), "text");
        assert_eq!(SqlParam::int(42).pg_type(), "bigint");
        assert_eq!(SqlParam::Bool(true).pg_type(), "boolean");
        assert_eq!(SqlParam::Null.pg_type(), "unknown");
    }

    #[test]
    fn test_sql_param_from() {
        let p: SqlParam = "hello".into();
        assert!(matches!(p, SqlParam::Text(s) if s == "hello"));

        let p: SqlParam = 42i64.into();
        assert!(matches!(p, SqlParam::Int(42)));

        let p: SqlParam = None::<String>.into();
        assert!(p.is_null());
    }

    #[test]
    fn test_to_literal() {
        assert_eq!(SqlParam::text("Alice").to_literal(), "'Alice'");
        assert_eq!(SqlParam::int(30).to_literal(), "30");
        assert_eq!(SqlParam::Null.to_literal(), "NULL");
        assert_eq!(SqlParam::Bool(true).to_literal(), "TRUE");
    }
}
