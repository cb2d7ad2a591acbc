use std::sync::Arc;

use tracing::{debug, warn};

use super::code::{retire_nonce, OwnershipCode};
use super::record::{self, LockRecord, NAME};
use super::{LockError, LockOptions};
use crate::clock::{Clock, SystemClock};
use crate::document::Update;
use crate::store::{DocumentStore, StoreError};

/// A named lease lock over one resource.
///
/// The handle holds configuration only; every bit of lock state lives in the
/// store. Any number of handles, in any number of processes, may point at the
/// same resource name.
#[derive(Clone)]
pub struct LockHandle<S> {
    store: S,
    collection: String,
    name: String,
    lease_duration_ms: i64,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> LockHandle<S> {
    /// Bind a handle to `name` in `collection`. Makes no store calls.
    pub fn new(
        store: S,
        collection: impl Into<String>,
        name: impl Into<String>,
        options: LockOptions,
    ) -> Result<Self, LockError> {
        let collection = collection.into();
        let name = name.into();

        if collection.is_empty() {
            return Err(LockError::Configuration("collection name is empty".into()));
        }
        if name.is_empty() {
            return Err(LockError::Configuration("resource name is empty".into()));
        }
        if options.lease_duration_ms <= 0 {
            return Err(LockError::Configuration(format!(
                "lease duration must be positive, got {}ms",
                options.lease_duration_ms
            )));
        }

        Ok(LockHandle {
            store,
            collection,
            name,
            lease_duration_ms: options.lease_duration_ms,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn lease_duration_ms(&self) -> i64 {
        self.lease_duration_ms
    }

    /// Create the unique index on `name`. Safe to call repeatedly; callers
    /// run it once before the first `acquire`.
    pub fn ensure_indexes(&self) -> Result<(), StoreError> {
        self.store
            .ensure_unique_index(&self.collection, NAME)
            .inspect_err(|e| warn!(collection = %self.collection, error = %e, "index setup failed"))
    }

    /// Try to become the holder.
    ///
    /// Returns a fresh code on success and `None` when someone else holds a
    /// live lease. Never waits or retries.
    pub fn acquire(&self) -> Result<Option<OwnershipCode>, StoreError> {
        let now = self.clock.now_millis();

        // Retire a lapsed holder first so its record vacates the unique key.
        let reaped = self
            .store
            .find_one_and_update(
                &self.collection,
                &record::stale(&self.name, now),
                &record::retire(&self.name, now, &retire_nonce()),
            )
            .inspect_err(|e| warn!(lock = %self.name, error = %e, "reap failed"))?;
        if reaped.is_some() {
            debug!(lock = %self.name, now, "reaped stale lease");
        }

        let code = OwnershipCode::generate();
        let fresh = LockRecord {
            name: self.name.clone(),
            code: code.as_str().to_string(),
            expire: now.saturating_add(self.lease_duration_ms),
            inserted: now,
            expired: None,
        };

        match self.store.insert(&self.collection, fresh.to_document()?) {
            Ok(_) => {
                debug!(lock = %self.name, expire = fresh.expire, "acquired");
                Ok(Some(code))
            }
            Err(e) if e.is_duplicate_key() => {
                debug!(lock = %self.name, "held by another owner");
                Ok(None)
            }
            Err(e) => {
                warn!(lock = %self.name, error = %e, "claim failed");
                Err(e)
            }
        }
    }

    /// Give up the lease held under `code`.
    ///
    /// `false` means no live lease matched: already released, already reaped,
    /// or never issued.
    pub fn release(&self, code: impl AsRef<str>) -> Result<bool, StoreError> {
        let now = self.clock.now_millis();
        let released = self
            .store
            .find_one_and_update(
                &self.collection,
                &record::held(&self.name, code.as_ref(), now),
                &record::retire(&self.name, now, &retire_nonce()),
            )
            .inspect_err(|e| warn!(lock = %self.name, error = %e, "release failed"))?
            .is_some();

        debug!(lock = %self.name, released, "release");
        Ok(released)
    }

    /// Push the deadline of the lease held under `code` out by `extension_ms`,
    /// or by the configured lease duration when `None` or non-positive.
    ///
    /// The extension is added to the current deadline, not to `now`.
    pub fn extend(
        &self,
        code: impl AsRef<str>,
        extension_ms: Option<i64>,
    ) -> Result<bool, StoreError> {
        let by = extension_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(self.lease_duration_ms);
        let now = self.clock.now_millis();

        let extended = self
            .store
            .find_one_and_update(
                &self.collection,
                &record::held(&self.name, code.as_ref(), now),
                &Update::new().inc(record::EXPIRE, by),
            )
            .inspect_err(|e| warn!(lock = %self.name, error = %e, "extend failed"))?
            .is_some();

        debug!(lock = %self.name, extended, by, "extend");
        Ok(extended)
    }

    /// The current live record for this resource, if any.
    pub fn holder(&self) -> Result<Option<LockRecord>, StoreError> {
        let now = self.clock.now_millis();
        self.store
            .find(&self.collection, &record::live(&self.name, now))?
            .into_iter()
            .next()
            .map(LockRecord::from_document)
            .transpose()
    }
}
