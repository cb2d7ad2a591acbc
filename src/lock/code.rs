use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token proving a successful acquisition.
///
/// Freshly generated codes carry 128 random bits, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnershipCode(String);

impl OwnershipCode {
    /// A new random code.
    pub fn generate() -> Self {
        OwnershipCode(format!("{:032x}", rand::random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for OwnershipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OwnershipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OwnershipCode {
    fn from(code: String) -> Self {
        OwnershipCode(code)
    }
}

impl From<&str> for OwnershipCode {
    fn from(code: &str) -> Self {
        OwnershipCode(code.to_string())
    }
}

/// Random suffix that keeps retired record names unique.
pub(crate) fn retire_nonce() -> String {
    format!("{:016x}", rand::random::<u64>())
}
