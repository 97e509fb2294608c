//! Parameterized SQL fragment builder.
//!
//! Provides a safe way to construct SQL read queries without string
//! concatenation: identifiers are escaped, values are always bound as
//! `$n` placeholders, and fragments compose by renumbering and
//! concatenating rather than interpolating.

mod builder;
mod expr;
pub mod identifier;
mod param;
mod select;

pub use builder::{SqlBuilder, SqlFragment};
pub use expr::{column_ref, jsonb_ref, Expr, OrderExpr};
pub use identifier::{escape_ident, quote_literal};
pub use param::SqlParam;
pub use select::SelectBuilder;

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        column_ref, escape_ident, jsonb_ref, quote_literal, Expr, OrderExpr, SelectBuilder,
        SqlBuilder, SqlFragment, SqlParam,
    };
}
