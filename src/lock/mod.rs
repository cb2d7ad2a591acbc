//! Lease locks - Mutual exclusion encoded as conditional writes on a document store.
//!
//! Each resource has at most one live record, guarded by a unique index on
//! `name`. `acquire` first retires a lapsed record (renaming it off the
//! unique key), then inserts a new one; the insert succeeds for exactly one
//! contender. `release` and `extend` only touch a live record carrying the
//! caller's ownership code.
//!
//! Expired leases are reaped lazily by the next `acquire`. Retired records
//! are never deleted.
//!
//! ## Example
//!
//! ```ignore
//! use lease_lock::{InMemoryDocumentStore, LockHandle, LockOptions};
//!
//! let lock = LockHandle::new(store, "locks", "nightly-report", LockOptions::default())?;
//! lock.ensure_indexes()?;
//!
//! if let Some(code) = lock.acquire()? {
//!     // ... protected work, calling lock.extend(&code, None) as needed ...
//!     lock.release(&code)?;
//! }
//! ```

mod code;
mod error;
mod handle;
mod lock_manager;
mod options;
mod record;

pub use code::OwnershipCode;
pub use error::LockError;
pub use handle::LockHandle;
pub use lock_manager::LockManager;
pub use options::{LockOptions, DEFAULT_COLLECTION, DEFAULT_LEASE_DURATION_MS};
pub use record::LockRecord;
