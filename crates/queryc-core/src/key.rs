//! Parameter key parser.
//!
//! Decodes a parameter key string into one of the five field-reference
//! shapes. The parser is a pure function of the key text: it knows
//! nothing about the declared entity or its associations, only the
//! grammar in the module docs below.
//!
//! ```text
//! joinJsonb := ident ':' ident '.' ident '[' ident ']'
//! join      := ident ':' ident '[' ident ']'
//! jsonb     := ident '.' ident '[' ident ']'
//! plain     := ident '[' ident ']'
//! ident     := [A-Za-z0-9_]+
//! ```
//!
//! Shapes are tried in the order above — `joinJsonb` before `join` before
//! `jsonb` before `plain` — so a key like `a:b.c[eq]` is never misread as
//! a `jsonb` reference to a field literally named `a:b`.

use regex::Regex;
use std::sync::OnceLock;

/// A parsed parameter key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldRef {
    /// A direct column on the root entity.
    Plain { field: String, op: String },
    /// A key inside a JSON-document column on the root entity.
    Jsonb {
        field: String,
        key: String,
        op: String,
    },
    /// A column on an associated entity.
    Join {
        assoc: String,
        field: String,
        op: String,
    },
    /// A JSON key inside a column on an associated entity.
    JoinJsonb {
        assoc: String,
        field: String,
        key: String,
        op: String,
    },
    /// Not a filter key: a control parameter or an unrecognized key.
    None,
}

fn join_jsonb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\w+):(\w+)\.(\w+)\[(\w+)\]$").expect("static pattern")
    })
}

fn join_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+):(\w+)\[(\w+)\]$").expect("static pattern"))
}

fn jsonb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\.(\w+)\[(\w+)\]$").expect("static pattern"))
}

fn plain_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\[(\w+)\]$").expect("static pattern"))
}

/// Parse a parameter key into a field reference. Never fails: an
/// unrecognized key yields [`FieldRef::None`].
pub fn parse_key(key: &str) -> FieldRef {
    if let Some(caps) = join_jsonb_re().captures(key) {
        return FieldRef::JoinJsonb {
            assoc: caps[1].to_string(),
            field: caps[2].to_string(),
            key: caps[3].to_string(),
            op: caps[4].to_string(),
        };
    }
    if let Some(caps) = join_re().captures(key) {
        return FieldRef::Join {
            assoc: caps[1].to_string(),
            field: caps[2].to_string(),
            op: caps[3].to_string(),
        };
    }
    if let Some(caps) = jsonb_re().captures(key) {
        return FieldRef::Jsonb {
            field: caps[1].to_string(),
            key: caps[2].to_string(),
            op: caps[3].to_string(),
        };
    }
    if let Some(caps) = plain_re().captures(key) {
        return FieldRef::Plain {
            field: caps[1].to_string(),
            op: caps[2].to_string(),
        };
    }
    FieldRef::None
}

/// Render a field reference back into its key string. `print_key(parse_key(k)) == k`
/// holds for every well-formed `k`; `FieldRef::None` has no canonical key
/// and panics if passed here.
pub fn print_key(field_ref: &FieldRef) -> String {
    match field_ref {
        FieldRef::Plain { field, op } => format!("{field}[{op}]"),
        FieldRef::Jsonb { field, key, op } => format!("{field}.{key}[{op}]"),
        FieldRef::Join { assoc, field, op } => format!("{assoc}:{field}[{op}]"),
        FieldRef::JoinJsonb {
            assoc,
            field,
            key,
            op,
        } => format!("{assoc}:{field}.{key}[{op}]"),
        FieldRef::None => panic!("FieldRef::None has no canonical key representation"),
    }
}

/// The non-association field name a [`FieldRef`] resolves to, used by the
/// value mapper to find a transformer. Returns `None` for [`FieldRef::None`].
pub fn logical_field(field_ref: &FieldRef) -> Option<&str> {
    match field_ref {
        FieldRef::Plain { field, .. }
        | FieldRef::Jsonb { field, .. }
        | FieldRef::Join { field, .. }
        | FieldRef::JoinJsonb { field, .. } => Some(field),
        FieldRef::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(
            parse_key("name[eq]"),
            FieldRef::Plain {
                field: "name".into(),
                op: "eq".into(),
            }
        );
    }

    #[test]
    fn test_parse_jsonb() {
        assert_eq!(
            parse_key("options.prompt[contains]"),
            FieldRef::Jsonb {
                field: "options".into(),
                key: "prompt".into(),
                op: "contains".into(),
            }
        );
    }

    #[test]
    fn test_parse_join() {
        assert_eq!(
            parse_key("current_version:status[eq]"),
            FieldRef::Join {
                assoc: "current_version".into(),
                field: "status".into(),
                op: "eq".into(),
            }
        );
    }

    #[test]
    fn test_parse_join_jsonb() {
        assert_eq!(
            parse_key("current_version:flow_input.prompt[contains]"),
            FieldRef::JoinJsonb {
                assoc: "current_version".into(),
                field: "flow_input".into(),
                key: "prompt".into(),
                op: "contains".into(),
            }
        );
    }

    #[test]
    fn test_parse_none() {
        assert_eq!(parse_key("sort"), FieldRef::None);
        assert_eq!(parse_key("limit"), FieldRef::None);
        assert_eq!(parse_key(""), FieldRef::None);
        assert_eq!(parse_key("malformed["), FieldRef::None);
    }

    #[test]
    fn test_round_trip() {
        for key in [
            "name[eq]",
            "options.prompt[contains]",
            "current_version:status[eq]",
            "current_version:flow_input.prompt[contains]",
        ] {
            assert_eq!(print_key(&parse_key(key)), key);
        }
    }

    #[test]
    fn test_logical_field() {
        assert_eq!(logical_field(&parse_key("flow_input[eq]")), Some("flow_input"));
        assert_eq!(
            logical_field(&parse_key("current_version:flow_input[eq]")),
            Some("flow_input")
        );
        assert_eq!(logical_field(&parse_key("sort")), None);
    }
}
