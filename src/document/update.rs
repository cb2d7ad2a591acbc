use serde_json::Value;

use super::Document;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Set(String, Value),
    Inc(String, i64),
}

/// An ordered list of field mutations applied to one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    ops: Vec<Op>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite (or create) a field.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ops.push(Op::Set(field.into(), value.into()));
        self
    }

    /// Add to an integer field. A missing field is treated as zero.
    pub fn inc(mut self, field: impl Into<String>, by: i64) -> Self {
        self.ops.push(Op::Inc(field.into(), by));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Fields written by this update, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().map(|op| match op {
            Op::Set(field, _) | Op::Inc(field, _) => field.as_str(),
        })
    }

    /// Apply every operation to `doc`.
    ///
    /// On error `doc` may be partially modified; stores apply updates to a
    /// scratch copy and only commit it on success.
    pub fn apply(&self, doc: &mut Document) -> Result<(), StoreError> {
        for op in &self.ops {
            match op {
                Op::Set(field, value) => {
                    doc.insert(field.clone(), value.clone());
                }
                Op::Inc(field, by) => {
                    let current = match doc.get(field) {
                        None => 0,
                        Some(value) => value.as_i64().ok_or_else(|| {
                            StoreError::Malformed(format!(
                                "cannot increment non-integer field '{}'",
                                field
                            ))
                        })?,
                    };
                    let next = current.checked_add(*by).ok_or_else(|| {
                        StoreError::Malformed(format!("increment overflows field '{}'", field))
                    })?;
                    doc.insert(field.clone(), Value::from(next));
                }
            }
        }
        Ok(())
    }
}
