//! Join planner.
//!
//! Groups `Join`/`JoinJsonb` field references by association, enforces
//! the caller-supplied whitelist before compiling any predicate, and
//! deduplicates so each association is joined exactly once no matter how
//! many of its fields are filtered on.

use crate::constraint::{compile_jsonb, compile_plain};
use crate::error::{Error, Result};
use crate::key::FieldRef;
use indexmap::IndexMap;
use queryc_sql::{Expr, SqlParam};

/// One association's join clause plus every AND-composed predicate
/// against its alias.
#[derive(Debug)]
pub struct JoinGroup {
    pub assoc: String,
    pub predicates: Vec<Expr>,
}

/// Plan joins for every `Join`/`JoinJsonb` reference in `refs`.
///
/// `refs` pairs each reference with the (already mapped) value bound to
/// its key. Whitelist membership is checked for every reference before a
/// single predicate is compiled: if any reference names a non-whitelisted
/// association, the whole call fails and no partial join is produced.
pub fn plan_joins(
    refs: &[(FieldRef, SqlParam)],
    whitelist: &[String],
    search_language: &str,
) -> Result<Vec<JoinGroup>> {
    for (field_ref, _) in refs {
        if let Some(assoc) = assoc_name(field_ref) {
            if !whitelist.iter().any(|w| w == assoc) {
                tracing::warn!(assoc, "rejecting join against non-whitelisted association");
                return Err(Error::JoinNotAllowed(assoc.to_string()));
            }
        }
    }

    let mut groups: IndexMap<String, Vec<Expr>> = IndexMap::new();
    for (field_ref, value) in refs {
        let Some(assoc) = assoc_name(field_ref) else {
            continue;
        };
        let predicate = match field_ref {
            FieldRef::Join { field, op, .. } => {
                compile_plain(Some(assoc), field, op, value, search_language)?
            }
            FieldRef::JoinJsonb { field, key, op, .. } => {
                compile_jsonb(Some(assoc), field, key, op, value)?
            }
            _ => unreachable!("assoc_name only returns Some for Join/JoinJsonb"),
        };
        groups.entry(assoc.to_string()).or_default().push(predicate);
    }

    Ok(groups
        .into_iter()
        .map(|(assoc, predicates)| JoinGroup { assoc, predicates })
        .collect())
}

fn assoc_name(field_ref: &FieldRef) -> Option<&str> {
    match field_ref {
        FieldRef::Join { assoc, .. } | FieldRef::JoinJsonb { assoc, .. } => Some(assoc),
        _ => None,
    }
}
