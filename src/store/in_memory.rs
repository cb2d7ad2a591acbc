//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use super::{DocumentStore, StoreError};
use crate::document::{Document, Filter, Update};

#[derive(Default)]
struct Collection {
    docs: Vec<Document>,
    unique: BTreeSet<String>,
}

impl Collection {
    /// Check `candidate` against every unique index, ignoring the document
    /// at `skip` (the one being replaced, if any).
    fn check_unique(
        &self,
        collection: &str,
        candidate: &Document,
        skip: Option<usize>,
    ) -> Result<(), StoreError> {
        for field in &self.unique {
            let Some(value) = candidate.get(field) else {
                continue;
            };
            let clash = self
                .docs
                .iter()
                .enumerate()
                .any(|(i, doc)| Some(i) != skip && doc.get(field) == Some(value));
            if clash {
                return Err(StoreError::DuplicateKey {
                    collection: collection.to_string(),
                    field: field.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// In-memory document store.
///
/// Every mutation runs under a single write lock, so each operation is
/// linearizable. Clone-friendly via Arc: clones share the same collections.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection (0 if it does not exist).
    pub fn len(&self, collection: &str) -> Result<usize, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Poisoned("len"))?;
        Ok(collections.get(collection).map_or(0, |c| c.docs.len()))
    }

    pub fn is_empty(&self, collection: &str) -> Result<bool, StoreError> {
        Ok(self.len(collection)? == 0)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Poisoned("ensure_unique_index"))?;
        let coll = collections.entry(collection.to_string()).or_default();

        if coll.unique.contains(field) {
            return Ok(());
        }

        let mut seen = Vec::new();
        for doc in &coll.docs {
            if let Some(value) = doc.get(field) {
                if seen.contains(&value) {
                    return Err(StoreError::IndexBuild(format!(
                        "collection {} already holds duplicate '{}' value {}",
                        collection, field, value
                    )));
                }
                seen.push(value);
            }
        }

        coll.unique.insert(field.to_string());
        Ok(())
    }

    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Poisoned("find_one_and_update"))?;
        let Some(coll) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(index) = coll.docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(None);
        };

        let before = coll.docs[index].clone();
        let mut after = before.clone();
        update.apply(&mut after)?;
        coll.check_unique(collection, &after, Some(index))?;
        coll.docs[index] = after;

        Ok(Some(before))
    }

    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Poisoned("insert"))?;
        let coll = collections.entry(collection.to_string()).or_default();

        coll.check_unique(collection, &doc, None)?;
        coll.docs.push(doc.clone());
        Ok(doc)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Poisoned("find"))?;
        Ok(collections
            .get(collection)
            .map(|c| c.docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default())
    }
}
