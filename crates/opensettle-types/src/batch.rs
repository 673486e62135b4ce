//! Batch and order types for the settlement engine.
//!
//! A batch is a bounded, append-only collection of confidential orders.
//! Each order carries exactly two opaque ciphertext handles — quantity and
//! price. Closing a batch seals it against new orders but keeps the stored
//! handles readable for later aggregation and decryption.

use serde::{Deserialize, Serialize};

use crate::{BatchId, CiphertextHandle};

/// Lifecycle state of a batch. At most one batch is `Open` system-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchState {
    /// Accepting new orders.
    Open,
    /// Sealed against new orders; contents retained for aggregation.
    Closed,
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// A confidential order: two opaque ciphertext handles.
///
/// The core never inspects the plaintext behind either handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Encrypted quantity.
    pub quantity: CiphertextHandle,
    /// Encrypted unit price.
    pub price: CiphertextHandle,
}

impl Order {
    #[must_use]
    pub fn new(quantity: CiphertextHandle, price: CiphertextHandle) -> Self {
        Self { quantity, price }
    }
}

/// A settlement batch: an id, a lifecycle state, and the admitted orders
/// in submission order. Batches are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Monotonic batch identifier, never reused.
    pub id: BatchId,
    /// Current lifecycle state.
    pub state: BatchState,
    /// Admitted orders in submission order.
    pub orders: Vec<Order>,
}

impl Batch {
    /// Create a new open batch with no orders.
    #[must_use]
    pub fn open(id: BatchId) -> Self {
        Self {
            id,
            state: BatchState::Open,
            orders: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == BatchState::Open
    }

    /// Number of admitted orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(b: u8) -> CiphertextHandle {
        CiphertextHandle([b; 32])
    }

    #[test]
    fn open_batch_starts_empty() {
        let batch = Batch::open(BatchId(1));
        assert!(batch.is_open());
        assert!(batch.is_empty());
        assert_eq!(batch.order_count(), 0);
    }

    #[test]
    fn batch_state_display() {
        assert_eq!(format!("{}", BatchState::Open), "OPEN");
        assert_eq!(format!("{}", BatchState::Closed), "CLOSED");
    }

    #[test]
    fn batch_serde_roundtrip() {
        let mut batch = Batch::open(BatchId(3));
        batch.orders.push(Order::new(handle(1), handle(2)));
        let json = serde_json::to_string(&batch).unwrap();
        let back: Batch = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, BatchId(3));
        assert_eq!(back.order_count(), 1);
        assert_eq!(back.orders[0].quantity, handle(1));
    }
}
