use std::sync::Arc;

use super::{LockError, LockHandle, LockOptions, DEFAULT_COLLECTION};
use crate::clock::{Clock, SystemClock};
use crate::store::{DocumentStore, StoreError};

/// Factory for lock handles sharing one store, collection and set of options.
///
/// Repeated calls with the same name return handles for the same logical
/// lock; the handles themselves carry no state, so there is nothing to cache.
#[derive(Clone)]
pub struct LockManager<S> {
    store: S,
    collection: String,
    options: LockOptions,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore + Clone> LockManager<S> {
    /// Manager over the default `locks` collection.
    pub fn new(store: S, options: LockOptions) -> Self {
        Self::with_collection(store, DEFAULT_COLLECTION, options)
    }

    pub fn with_collection(store: S, collection: impl Into<String>, options: LockOptions) -> Self {
        LockManager {
            store,
            collection: collection.into(),
            options,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source for every handle created afterwards.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn options(&self) -> LockOptions {
        self.options
    }

    /// Create the unique index for the managed collection.
    pub fn ensure_indexes(&self) -> Result<(), StoreError> {
        self.store.ensure_unique_index(&self.collection, super::record::NAME)
    }

    /// A handle for `name` using the manager's defaults.
    pub fn handle(&self, name: &str) -> Result<LockHandle<S>, LockError> {
        self.handle_with(name, self.options)
    }

    /// A handle for `name` with its own options.
    pub fn handle_with(&self, name: &str, options: LockOptions) -> Result<LockHandle<S>, LockError> {
        Ok(LockHandle::new(self.store.clone(), self.collection.clone(), name, options)?
            .with_clock(Arc::clone(&self.clock)))
    }
}
