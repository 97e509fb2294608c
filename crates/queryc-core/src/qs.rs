//! Query-string decoder.
//!
//! Splits and percent-decodes a raw URL query string into the parameter
//! mapping every other component consumes. This module knows nothing
//! about the key grammar in [`crate::key`] — it only decodes text.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use queryc_sql::SqlParam;

/// Decode a raw query string into an ordered key→value mapping.
///
/// An optional leading `?` is stripped. Segments are split on `&`, each
/// split on the first `=`; both sides are percent-decoded and `+` is
/// treated as a space, matching `application/x-www-form-urlencoded`.
/// Repeated keys: the last occurrence wins.
pub fn decode_query_string(qs: &str) -> Result<IndexMap<String, String>> {
    let qs = qs.strip_prefix('?').unwrap_or(qs);

    let mut params = IndexMap::new();
    if qs.is_empty() {
        return Ok(params);
    }

    for segment in qs.split('&') {
        if segment.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match segment.split_once('=') {
            Some((k, v)) => (k, v),
            None => (segment, ""),
        };

        let key = decode_component(raw_key)
            .map_err(|_| Error::InvalidQueryParam(segment.to_string()))?;
        let value = decode_component(raw_value)
            .map_err(|_| Error::InvalidQueryParam(segment.to_string()))?;

        params.insert(key, value);
    }

    Ok(params)
}

fn decode_component(s: &str) -> std::result::Result<String, std::str::Utf8Error> {
    let with_spaces = s.replace('+', " ");
    Ok(percent_decode_str(&with_spaces).decode_utf8()?.to_string())
}

/// Lift a decoded string mapping into the typed form [`compile`](crate::compile::compile)
/// and the mapper consume, wrapping every value as [`SqlParam::Text`].
pub fn to_param_map(params: IndexMap<String, String>) -> IndexMap<String, SqlParam> {
    params.into_iter().map(|(k, v)| (k, SqlParam::Text(v))).collect()
}
