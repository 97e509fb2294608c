//! Value mapper: `map` and `map_safe`.
//!
//! Walks a decoded parameter mapping and rewrites each value through a
//! caller-supplied per-field transformer, resolved by exact field name
//! first, then by the first matching pattern in insertion order, falling
//! back to the identity transformer.

use crate::error::{Error, Result};
use crate::key::{logical_field, parse_key};
use crate::source::ParamSource;
use indexmap::IndexMap;
use queryc_sql::SqlParam;
use regex::Regex;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// What a transformer reports back for one value.
#[derive(Clone, Debug)]
pub enum TransformOutcome {
    /// Success, with the (possibly retyped) replacement value.
    Ok(SqlParam),
    /// Failure, carrying a human-readable reason.
    Err(String),
}

/// A unary callback rewriting one parameter value.
pub type Transformer = Arc<dyn Fn(&SqlParam) -> TransformOutcome + Send + Sync>;

/// A mapping from field identifiers (exact or pattern) to transformers.
#[derive(Clone, Default)]
pub struct MapperSpec {
    exact: IndexMap<String, Transformer>,
    patterns: Vec<(Regex, Transformer)>,
}

impl MapperSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer for an exact field name.
    pub fn with_exact(
        mut self,
        field: impl Into<String>,
        transformer: impl Fn(&SqlParam) -> TransformOutcome + Send + Sync + 'static,
    ) -> Self {
        self.exact.insert(field.into(), Arc::new(transformer));
        self
    }

    /// Register a transformer for every field name matching `pattern`.
    /// Patterns are scanned in registration order on an exact-match miss.
    pub fn with_pattern(
        mut self,
        pattern: &str,
        transformer: impl Fn(&SqlParam) -> TransformOutcome + Send + Sync + 'static,
    ) -> std::result::Result<Self, regex::Error> {
        let re = Regex::new(pattern)?;
        self.patterns.push((re, Arc::new(transformer)));
        Ok(self)
    }

    /// Resolve the transformer for a logical field name. `None` means
    /// "defaults to identity" — distinct from an explicitly registered
    /// identity transformer, per the empty-value-drop rule in `map_safe`.
    fn find(&self, field: &str) -> Option<&Transformer> {
        if let Some(t) = self.exact.get(field) {
            return Some(t);
        }
        self.patterns
            .iter()
            .find(|(re, _)| re.is_match(field))
            .map(|(_, t)| t)
    }
}

/// The logical field name `map`/`map_safe` resolve a transformer against
/// for a given parameter key.
fn logical_field_for_key(key: &str) -> String {
    let field_ref = parse_key(key);
    match logical_field(&field_ref) {
        Some(field) => field.to_string(),
        None => key.strip_prefix('-').unwrap_or(key).to_string(),
    }
}

/// Apply `spec` to every value in `params` (a raw query string or an
/// already-decoded mapping), unconditionally.
///
/// This is the unsafe variant: a transformer's panic propagates to the
/// caller unmodified, and an explicit error return is turned into a
/// panic as well, since `map` has no error channel of its own — a
/// malformed query string is reported the same way. Use `map_safe` for a
/// pipeline that should convert failures into a structured error.
pub fn map(params: impl Into<ParamSource>, spec: &MapperSpec) -> IndexMap<String, SqlParam> {
    let params = match params.into().into_strings() {
        Ok(params) => params,
        Err(err) => panic!("{err}"),
    };
    let mut out = IndexMap::with_capacity(params.len());

    for (key, value) in params {
        let logical = logical_field_for_key(&key);
        let input = SqlParam::Text(value);

        let transformed = match spec.find(&logical) {
            Some(transformer) => match transformer(&input) {
                TransformOutcome::Ok(v) => v,
                TransformOutcome::Err(reason) => panic!("{reason}"),
            },
            None => input,
        };

        out.insert(key, transformed);
    }

    out
}

/// Apply `spec` to every value in `params` (a raw query string or an
/// already-decoded mapping), catching transformer panics and converting
/// any failure into [`Error::TransformationFailed`].
///
/// Empty or null values for a field with a custom (non-identity)
/// transformer are dropped from the result without invoking the
/// transformer at all — every opaque-ID decoder this pipeline exists to
/// support fails on empty input, so this spares every caller from
/// writing an empty-guard themselves.
pub fn map_safe(
    params: impl Into<ParamSource>,
    spec: &MapperSpec,
) -> Result<IndexMap<String, SqlParam>> {
    let params = params.into().into_strings()?;
    let mut out = IndexMap::with_capacity(params.len());

    for (key, value) in params {
        let logical = logical_field_for_key(&key);
        let transformer = spec.find(&logical);

        if value.is_empty() && transformer.is_some() {
            tracing::debug!(field = %logical, "map_safe: skipping empty value for mapped field");
            continue;
        }

        let input = SqlParam::Text(value);
        let outcome = match transformer {
            Some(transformer) => {
                catch_unwind(AssertUnwindSafe(|| transformer(&input))).unwrap_or_else(|panic| {
                    TransformOutcome::Err(panic_message(panic))
                })
            }
            None => TransformOutcome::Ok(input),
        };

        match outcome {
            TransformOutcome::Ok(v) => {
                out.insert(key, v);
            }
            TransformOutcome::Err(reason) => return Err(Error::TransformationFailed(reason)),
        }
    }

    Ok(out)
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "transformer panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_identity_spec_round_trips() {
        let spec = MapperSpec::new();
        let input = params(&[("name[eq]", "Alice")]);
        let out = map_safe(input, &spec).unwrap();
        assert_eq!(out.get("name[eq]").unwrap(), &SqlParam::text("Alice"));
    }

    #[test]
    fn test_exact_transformer_success() {
        let spec = MapperSpec::new().with_exact("user_id", |v| match v {
            SqlParam::Text(s) if s == "valid_123" => TransformOutcome::Ok(SqlParam::Int(123)),
            _ => TransformOutcome::Err("Invalid hash".into()),
        });
        let input = params(&[("user_id[eq]", "valid_123")]);
        let out = map_safe(input, &spec).unwrap();
        assert_eq!(out.get("user_id[eq]").unwrap(), &SqlParam::Int(123));
    }

    #[test]
    fn test_exact_transformer_failure() {
        let spec = MapperSpec::new().with_exact("user_id", |_| {
            TransformOutcome::Err("Invalid hash".into())
        });
        let input = params(&[("user_id[eq]", "invalid_hash")]);
        let err = map_safe(input, &spec).unwrap_err();
        assert_eq!(err, Error::TransformationFailed("Invalid hash".into()));
    }

    #[test]
    fn test_panic_is_caught_by_map_safe() {
        let spec = MapperSpec::new().with_exact("user_id", |_| {
            panic!("boom");
        });
        let input = params(&[("user_id[eq]", "x")]);
        let err = map_safe(input, &spec).unwrap_err();
        assert_eq!(err, Error::TransformationFailed("boom".into()));
    }

    #[test]
    fn test_empty_value_with_custom_transformer_is_dropped() {
        let called = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let called_clone = called.clone();
        let spec = MapperSpec::new().with_exact("flow_input", move |v| {
            called_clone.store(true, std::sync::atomic::Ordering::SeqCst);
            TransformOutcome::Ok(v.clone())
        });
        let input = params(&[
            ("current_version:flow_input.prompt[contains]", ""),
            ("asset_type[eq]", "image"),
        ]);
        let out = map_safe(input, &spec).unwrap();
        assert!(!out.contains_key("current_version:flow_input.prompt[contains]"));
        assert_eq!(out.get("asset_type[eq]").unwrap(), &SqlParam::text("image"));
        assert!(!called.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_pattern_fallback() {
        let spec = MapperSpec::new()
            .with_pattern(r"^.*_id$", |_| TransformOutcome::Ok(SqlParam::Int(7)))
            .unwrap();
        let input = params(&[("owner_id[eq]", "whatever")]);
        let out = map_safe(input, &spec).unwrap();
        assert_eq!(out.get("owner_id[eq]").unwrap(), &SqlParam::Int(7));
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_map_propagates_panics() {
        let spec = MapperSpec::new().with_exact("user_id", |_| panic!("boom"));
        let input = params(&[("user_id[eq]", "x")]);
        let _ = map(input, &spec);
    }

    #[test]
    fn test_map_safe_agrees_on_query_string_and_decoded_mapping() {
        let spec = MapperSpec::new().with_exact("user_id", |v| match v {
            SqlParam::Text(s) if s == "valid_123" => TransformOutcome::Ok(SqlParam::Int(123)),
            _ => TransformOutcome::Err("Invalid hash".into()),
        });

        let qs = "user_id[eq]=valid_123";
        let decoded = crate::qs::decode_query_string(qs).unwrap();

        let via_string = map_safe(qs, &spec).unwrap();
        let via_decoded = map_safe(decoded, &spec).unwrap();
        assert_eq!(via_string, via_decoded);
    }
}
