//! Lock records and the queries that select them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{Document, Filter, Update};
use crate::store::StoreError;

pub(crate) const NAME: &str = "name";
pub(crate) const CODE: &str = "code";
pub(crate) const EXPIRE: &str = "expire";
pub(crate) const EXPIRED: &str = "expired";

/// One lock document.
///
/// A record is live while `expired` is absent and `expire` lies in the
/// future. Retired records keep their data under a rewritten `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    pub name: String,
    pub code: String,
    /// Lease deadline, epoch millis.
    pub expire: i64,
    /// Creation instant, epoch millis.
    pub inserted: i64,
    /// Retirement instant, epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<i64>,
}

impl LockRecord {
    pub fn is_live(&self, now: i64) -> bool {
        self.expired.is_none() && self.expire > now
    }

    pub fn to_document(&self) -> Result<Document, StoreError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Malformed(format!(
                "lock record serialized to non-object {}",
                other
            ))),
            Err(e) => Err(StoreError::Malformed(e.to_string())),
        }
    }

    pub fn from_document(doc: Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

/// The live record for `name` whose lease ran out before `now`.
pub(crate) fn stale(name: &str, now: i64) -> Filter {
    Filter::eq(NAME, name)
        .and(Filter::missing(EXPIRED))
        .and(Filter::lt(EXPIRE, now))
}

/// The live, unexpired record for `name` held under `code`.
pub(crate) fn held(name: &str, code: &str, now: i64) -> Filter {
    Filter::eq(NAME, name)
        .and(Filter::eq(CODE, code))
        .and(Filter::gt(EXPIRE, now))
        .and(Filter::missing(EXPIRED))
}

/// Any live, unexpired record for `name`.
pub(crate) fn live(name: &str, now: i64) -> Filter {
    Filter::eq(NAME, name)
        .and(Filter::gt(EXPIRE, now))
        .and(Filter::missing(EXPIRED))
}

/// Move a record off the unique `name` key and stamp it retired.
pub(crate) fn retire(name: &str, now: i64, nonce: &str) -> Update {
    Update::new()
        .set(NAME, format!("{}:{}:{}", name, now, nonce))
        .set(EXPIRED, now)
}
