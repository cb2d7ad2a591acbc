use serde_json::Value;

use super::{int_field, Document};

/// A predicate over a single document.
///
/// Numeric comparisons only match integer fields; a missing or non-integer
/// field never satisfies `Lt` or `Gt`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the given value.
    Eq(String, Value),
    /// Field is present (`true`) or absent (`false`).
    Exists(String, bool),
    /// Integer field is strictly less than the bound.
    Lt(String, i64),
    /// Integer field is strictly greater than the bound.
    Gt(String, i64),
    /// Every inner filter matches. An empty conjunction matches everything.
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Filter::Exists(field.into(), true)
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Filter::Exists(field.into(), false)
    }

    pub fn lt(field: impl Into<String>, bound: i64) -> Self {
        Filter::Lt(field.into(), bound)
    }

    pub fn gt(field: impl Into<String>, bound: i64) -> Self {
        Filter::Gt(field.into(), bound)
    }

    /// Conjunction of `self` and `other`, flattening nested `And`s.
    pub fn and(self, other: Filter) -> Self {
        let mut clauses = match self {
            Filter::And(clauses) => clauses,
            single => vec![single],
        };
        match other {
            Filter::And(more) => clauses.extend(more),
            single => clauses.push(single),
        }
        Filter::And(clauses)
    }

    /// Evaluate the filter against a document.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Eq(field, value) => doc.get(field) == Some(value),
            Filter::Exists(field, present) => doc.contains_key(field) == *present,
            Filter::Lt(field, bound) => int_field(doc, field).is_some_and(|v| v < *bound),
            Filter::Gt(field, bound) => int_field(doc, field).is_some_and(|v| v > *bound),
            Filter::And(clauses) => clauses.iter().all(|clause| clause.matches(doc)),
        }
    }
}
