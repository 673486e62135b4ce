//! Opaque ciphertext handles.
//!
//! A [`CiphertextHandle`] is the only representation of an order value the
//! core ever sees. The handle is a 32-byte reference into the homomorphic
//! backend; the plaintext behind it is never observable through this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to an encrypted value held by the homomorphic backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CiphertextHandle(pub [u8; 32]);

impl CiphertextHandle {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ct:{}", hex::encode(&self.0[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_truncated_hex() {
        let h = CiphertextHandle([0x1F; 32]);
        assert_eq!(format!("{h}"), "ct:1f1f1f1f1f1f1f1f");
    }

    #[test]
    fn serde_roundtrip() {
        let h = CiphertextHandle([9u8; 32]);
        let json = serde_json::to_string(&h).unwrap();
        let back: CiphertextHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
