//! Documents - Schemaless records plus the query and update language used against them.
//!
//! A `Document` is a JSON object. `Filter` selects documents and `Update`
//! mutates them; together they describe the conditional writes a
//! `DocumentStore` applies atomically.
//!
//! ## Example
//!
//! ```ignore
//! use lease_lock::{Filter, Update};
//!
//! let stale = Filter::eq("name", "reports")
//!     .and(Filter::missing("expired"))
//!     .and(Filter::lt("expire", now));
//! let retire = Update::new().set("expired", now);
//! ```

mod filter;
mod update;

use serde_json::{Map, Value};

/// A single stored document.
pub type Document = Map<String, Value>;

pub use filter::Filter;
pub use update::Update;

/// Read an integer field, if present and integral.
pub(crate) fn int_field(doc: &Document, field: &str) -> Option<i64> {
    doc.get(field).and_then(Value::as_i64)
}
