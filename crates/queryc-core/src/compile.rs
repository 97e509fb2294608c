//! Query assembler.
//!
//! Orchestrates the key parser, constraint compiler, join planner, and
//! sort/paginator into the public `compile` entry point.

use crate::config::Config;
use crate::constraint::{compile_jsonb, compile_plain};
use crate::error::Result;
use crate::join::plan_joins;
use crate::key::{parse_key, FieldRef};
use crate::sort::{resolve_limit, resolve_order, resolve_range};
use crate::source::ParamSource;
use indexmap::IndexMap;
use queryc_sql::{SelectBuilder, SqlFragment, SqlParam};

/// Options threaded into [`compile`].
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Associations a `Join`/`JoinJsonb` reference is allowed to name.
    pub joins: Vec<String>,
}

/// The compiled query: an opaque handle over a parameterized SQL
/// fragment, plus a debug rendering with literals inlined.
#[derive(Clone, Debug)]
pub struct CompiledQuery(SqlFragment);

impl CompiledQuery {
    /// The executable SQL text, with `$n` placeholders.
    pub fn to_sql(&self) -> &str {
        self.0.sql()
    }

    /// The bound parameters, in placeholder order.
    pub fn params(&self) -> &[SqlParam] {
        self.0.params()
    }

    /// A human-readable rendering with every placeholder substituted by
    /// its literal value. Never used for execution.
    pub fn to_sql_inline(&self) -> String {
        self.0.to_inline_sql()
    }
}

/// Compile a parameter source — a raw query string or an already-decoded
/// mapping — against `entity` into a query.
///
/// Returns the first error encountered; no query object is returned on
/// failure, and the partially-built query is dropped with it.
pub fn compile(
    params: impl Into<ParamSource>,
    entity: &str,
    opts: &CompileOptions,
    cfg: &Config,
) -> Result<CompiledQuery> {
    let params = params.into().into_typed()?;
    tracing::debug!(entity, param_count = params.len(), "compiling query");

    let mut builder = SelectBuilder::new().from_table(entity);
    let mut join_refs: Vec<(FieldRef, SqlParam)> = Vec::new();
    let mut control: IndexMap<String, String> = IndexMap::new();

    for (key, value) in &params {
        let field_ref = parse_key(key);
        match &field_ref {
            FieldRef::Plain { field, op } => {
                let expr = compile_plain(None, field, op, value, &cfg.search_language)?;
                builder = builder.where_expr(expr);
            }
            FieldRef::Jsonb {
                field,
                key: json_key,
                op,
            } => {
                let expr = compile_jsonb(None, field, json_key, op, value)?;
                builder = builder.where_expr(expr);
            }
            FieldRef::Join { .. } | FieldRef::JoinJsonb { .. } => {
                join_refs.push((field_ref.clone(), value.clone()));
            }
            FieldRef::None => {
                let text = match value {
                    SqlParam::Text(s) => s.clone(),
                    other => other.to_literal(),
                };
                control.insert(key.clone(), text);
            }
        }
    }

    let join_groups = plan_joins(&join_refs, &opts.joins, &cfg.search_language)?;
    for group in join_groups {
        builder = builder.inner_join(&group.assoc);
        for predicate in group.predicates {
            builder = builder.where_expr(predicate);
        }
    }

    if let Some(range_expr) = resolve_range(&control, cfg)? {
        builder = builder.where_expr(range_expr);
    }

    builder = builder.order_by(resolve_order(&control, cfg));
    builder = builder.limit(resolve_limit(&control, cfg)?);

    Ok(CompiledQuery(builder.build()))
}

/// Right-biased shallow merge of two parameter sources, used to staple
/// access-control predicates onto a caller-supplied query before compiling
/// it. Either side may be a raw query string or an already-decoded mapping.
pub fn filter(
    base: impl Into<ParamSource>,
    overrides: impl Into<ParamSource>,
) -> Result<IndexMap<String, String>> {
    let mut merged = base.into().into_strings()?;
    for (k, v) in overrides.into().into_strings()? {
        merged.insert(k, v);
    }
    Ok(merged)
}
