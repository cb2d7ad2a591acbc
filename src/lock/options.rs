use serde::{Deserialize, Serialize};

/// Default lease length: 30 seconds.
pub const DEFAULT_LEASE_DURATION_MS: i64 = 30_000;

/// Default collection holding lock records.
pub const DEFAULT_COLLECTION: &str = "locks";

/// Per-handle settings.
///
/// Deserializable with defaults, so it can sit inside a host's config file:
///
/// ```ignore
/// let opts: LockOptions = serde_json::from_str(r#"{ "lease_duration_ms": 5000 }"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockOptions {
    /// How long a freshly acquired lease lasts, and the default `extend` step.
    pub lease_duration_ms: i64,
}

impl Default for LockOptions {
    fn default() -> Self {
        LockOptions {
            lease_duration_ms: DEFAULT_LEASE_DURATION_MS,
        }
    }
}

impl LockOptions {
    pub fn with_lease_duration_ms(mut self, lease_duration_ms: i64) -> Self {
        self.lease_duration_ms = lease_duration_ms;
        self
    }
}
