//! Rate-limited action kinds.

use serde::{Deserialize, Serialize};

/// The privileged actions subject to per-actor cooldowns.
///
/// Each `(actor, action kind)` pair has its own cooldown window: a provider
/// in submission cooldown can still request a summary, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Submitting an order into the open batch.
    Submit,
    /// Requesting an aggregate summary decryption.
    Decrypt,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "SUBMIT"),
            Self::Decrypt => write!(f, "DECRYPT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(format!("{}", ActionKind::Submit), "SUBMIT");
        assert_eq!(format!("{}", ActionKind::Decrypt), "DECRYPT");
    }
}
