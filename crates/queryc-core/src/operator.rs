//! The closed operator vocabulary.

use crate::error::Error;
use std::convert::TryFrom;

/// One of the fixed set of operators a key's `[op]` suffix may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    StartsWith,
    EndsWith,
    True,
    False,
    In,
    Nil,
    Search,
}

impl TryFrom<&str> for Operator {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(match s {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "contains" => Operator::Contains,
            "starts_with" => Operator::StartsWith,
            "ends_with" => Operator::EndsWith,
            "true" => Operator::True,
            "false" => Operator::False,
            "in" => Operator::In,
            "nil" => Operator::Nil,
            "search" => Operator::Search,
            other => return Err(Error::InvalidConstraint(other.to_string())),
        })
    }
}
