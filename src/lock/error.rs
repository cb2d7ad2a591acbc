use std::fmt;

use crate::store::StoreError;

/// Error type for constructing and operating lock handles.
#[derive(Debug, Clone, PartialEq)]
pub enum LockError {
    /// The handle was built with an unusable collection, resource name or lease.
    Configuration(String),
    /// The backing store failed.
    Store(StoreError),
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Configuration(msg) => write!(f, "lock configuration error: {}", msg),
            LockError::Store(err) => write!(f, "lock store error: {}", err),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LockError::Store(err) => Some(err),
            LockError::Configuration(_) => None,
        }
    }
}

impl From<StoreError> for LockError {
    fn from(err: StoreError) -> Self {
        LockError::Store(err)
    }
}
