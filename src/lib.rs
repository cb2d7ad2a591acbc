mod clock;
mod document;
mod lock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use document::{Document, Filter, Update};
pub use lock::{
    LockError, LockHandle, LockManager, LockOptions, LockRecord, OwnershipCode,
    DEFAULT_COLLECTION, DEFAULT_LEASE_DURATION_MS,
};
pub use store::{DocumentStore, InMemoryDocumentStore, StoreError};
