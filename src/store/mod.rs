//! DocumentStore - The atomic document store the lock protocol runs on.
//!
//! Any backend offering single-document conditional updates and unique
//! indexes can implement this trait (MongoDB collections, a SQL table with
//! a unique column, ...). `InMemoryDocumentStore` is the reference backend.

mod in_memory;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::document::{Document, Filter, Update};

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A write would have produced two documents with the same value for a
    /// uniquely indexed field.
    DuplicateKey {
        collection: String,
        field: String,
        value: Value,
    },
    /// A unique index could not be created over the existing documents.
    IndexBuild(String),
    /// The query or update could not be applied to the stored document.
    Malformed(String),
    /// An internal lock was poisoned.
    Poisoned(&'static str),
    /// Any other backend failure (network, authorization, ...).
    Backend(String),
}

impl StoreError {
    /// True if this is a uniqueness-constraint violation.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey {
                collection,
                field,
                value,
            } => write!(
                f,
                "duplicate key in {} on field '{}': {}",
                collection, field, value
            ),
            StoreError::IndexBuild(msg) => write!(f, "index build failed: {}", msg),
            StoreError::Malformed(msg) => write!(f, "malformed store operation: {}", msg),
            StoreError::Poisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Atomic single-document operations over named collections.
pub trait DocumentStore: Send + Sync {
    /// Create a unique index on `field`. Calling it again is a no-op.
    fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError>;

    /// Atomically find at most one document matching `filter` and apply
    /// `update` to it. Returns the document as it was before the update, or
    /// `None` (with nothing written) when no document matched.
    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a new document. Unique index violations are reported as
    /// `StoreError::DuplicateKey`.
    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError>;

    /// All documents matching `filter`.
    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        (**self).ensure_unique_index(collection, field)
    }

    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>, StoreError> {
        (**self).find_one_and_update(collection, filter, update)
    }

    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError> {
        (**self).insert(collection, doc)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        (**self).find(collection, filter)
    }
}

pub use in_memory::InMemoryDocumentStore;
