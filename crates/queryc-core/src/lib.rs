//! Compiles HTTP-style query strings into relational queries against a
//! declared entity.
//!
//! The pipeline, smallest piece first:
//!
//! 1. **Key parser** (`key`) — decodes a parameter key into a field
//!    reference (plain, JSONB, joined, joined-JSONB, or none).
//! 2. **Query-string decoder** (`qs`) — splits and percent-decodes a raw
//!    query string into a key→value mapping.
//! 3. **Constraint compiler** (`constraint`) — maps an operator token to a
//!    predicate for a plain or JSONB field.
//! 4. **Join planner** (`join`) — whitelists, deduplicates, and compiles
//!    predicates for joined fields.
//! 5. **Sort & paginator** (`sort`) — `ORDER BY` / `LIMIT` / range.
//! 6. **Value mapper** (`mapper`) — `map` / `map_safe`, rewriting values
//!    before compilation.
//! 7. **Query assembler** (`compile`) — orchestrates 1–5 into the public
//!    `compile` entry point.
//!
//! The compiler is pure and synchronous (no I/O, no shared state); every
//! function here is safe to call concurrently from any number of threads
//! without external synchronization.
//!
//! `compile`, `filter`, `map`, and `map_safe` all accept either a raw query
//! string or an already-decoded mapping (see [`ParamSource`]), so they chain
//! directly: a caller pipes a query string through `filter` to staple on
//! access-control predicates, then `map_safe` to decode opaque IDs, then
//! `compile`, without manually decoding at each step.
//!
//! # Example
//!
//! ```
//! use queryc_core::{compile, CompileOptions, Config};
//!
//! let query = compile(
//!     "name[eq]=Alice&sort=-age",
//!     "User",
//!     &CompileOptions::default(),
//!     &Config::default(),
//! )
//! .unwrap();
//! assert!(query.to_sql().contains("\"name\" = $1"));
//! ```

pub mod compile;
pub mod config;
pub mod constraint;
pub mod error;
pub mod join;
pub mod key;
pub mod mapper;
pub mod operator;
pub mod qs;
pub mod sort;
pub mod source;

pub use compile::{compile, filter, CompileOptions, CompiledQuery};
pub use config::Config;
pub use error::{Error, Result};
pub use key::FieldRef;
pub use mapper::{map, map_safe, MapperSpec, TransformOutcome, Transformer};
pub use operator::Operator;
pub use qs::decode_query_string;
pub use source::ParamSource;

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        compile, filter, map, map_safe, CompileOptions, CompiledQuery, Config, Error, FieldRef,
        MapperSpec, Operator, ParamSource, Result, TransformOutcome,
    };
    pub use super::qs::decode_query_string;
}
