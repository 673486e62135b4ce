//! Append-only per-batch order storage.
//!
//! The ledger stores every batch ever opened, keyed by id. Orders are only
//! appended, never mutated or removed; closing a batch flips its state but
//! keeps the stored handles readable for later aggregation and decryption.

use std::collections::BTreeMap;

use opensettle_types::{
    ActorId, Batch, BatchId, BatchState, OpensettleError, Order, Result, constants,
};
use sha2::{Digest, Sha256};

/// All batches, past and present.
pub struct OrderLedger {
    batches: BTreeMap<BatchId, Batch>,
    /// Maximum orders admitted per batch.
    max_orders: usize,
}

impl OrderLedger {
    /// Create an empty ledger with the default per-batch order limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(constants::MAX_ORDERS_PER_BATCH)
    }

    /// Create an empty ledger with a custom per-batch order limit.
    #[must_use]
    pub fn with_limit(max_orders: usize) -> Self {
        Self {
            batches: BTreeMap::new(),
            max_orders,
        }
    }

    /// Insert a freshly opened batch.
    pub fn create(&mut self, id: BatchId) {
        self.batches.insert(id, Batch::open(id));
    }

    /// Mark a batch closed, returning its order count.
    ///
    /// # Errors
    /// Returns [`OpensettleError::BatchNotFound`] for an unknown id.
    pub fn close(&mut self, id: BatchId) -> Result<usize> {
        let batch = self
            .batches
            .get_mut(&id)
            .ok_or(OpensettleError::BatchNotFound(id))?;
        batch.state = BatchState::Closed;
        Ok(batch.order_count())
    }

    /// Append an order to a batch, returning its index.
    ///
    /// # Errors
    /// - [`OpensettleError::BatchNotFound`] for an unknown id
    /// - [`OpensettleError::BatchFull`] at the per-batch limit
    pub fn append(&mut self, id: BatchId, order: Order) -> Result<usize> {
        let max_orders = self.max_orders;
        let batch = self
            .batches
            .get_mut(&id)
            .ok_or(OpensettleError::BatchNotFound(id))?;
        if batch.order_count() >= max_orders {
            return Err(OpensettleError::BatchFull {
                batch_id: id,
                limit: max_orders,
            });
        }
        batch.orders.push(order);
        Ok(batch.order_count() - 1)
    }

    /// Look up a batch by id.
    #[must_use]
    pub fn batch(&self, id: BatchId) -> Option<&Batch> {
        self.batches.get(&id)
    }

    /// Look up a batch by id, failing for unknown ids.
    ///
    /// # Errors
    /// Returns [`OpensettleError::BatchNotFound`].
    pub fn require_batch(&self, id: BatchId) -> Result<&Batch> {
        self.batches.get(&id).ok_or(OpensettleError::BatchNotFound(id))
    }

    /// Order count of a batch, if it exists.
    #[must_use]
    pub fn order_count(&self, id: BatchId) -> Option<usize> {
        self.batches.get(&id).map(Batch::order_count)
    }

    /// Whether a batch is at its order limit.
    #[must_use]
    pub fn is_full(&self, id: BatchId) -> bool {
        self.order_count(id).is_some_and(|n| n >= self.max_orders)
    }

    /// The per-batch order limit.
    #[must_use]
    pub fn max_orders(&self) -> usize {
        self.max_orders
    }

    /// Number of batches ever opened.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// One-way commitment recorded when an order is admitted.
///
/// Commits to who submitted into which batch at which index — never to the
/// ciphertext handles, so the audit log reveals nothing about order values.
#[must_use]
pub fn submission_commitment(actor: ActorId, batch_id: BatchId, index: usize) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"opensettle:commitment:v1:");
    hasher.update(actor.as_bytes());
    hasher.update(batch_id.0.to_le_bytes());
    hasher.update((index as u64).to_le_bytes());
    let digest = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&digest);
    hash
}

#[cfg(test)]
mod tests {
    use opensettle_types::CiphertextHandle;

    use super::*;

    fn order(b: u8) -> Order {
        Order::new(CiphertextHandle([b; 32]), CiphertextHandle([b + 1; 32]))
    }

    #[test]
    fn append_returns_sequential_indexes() {
        let mut ledger = OrderLedger::new();
        ledger.create(BatchId(1));
        assert_eq!(ledger.append(BatchId(1), order(1)).unwrap(), 0);
        assert_eq!(ledger.append(BatchId(1), order(3)).unwrap(), 1);
        assert_eq!(ledger.order_count(BatchId(1)), Some(2));
    }

    #[test]
    fn append_to_unknown_batch_fails() {
        let mut ledger = OrderLedger::new();
        let err = ledger.append(BatchId(9), order(1)).unwrap_err();
        assert!(matches!(err, OpensettleError::BatchNotFound(_)));
    }

    #[test]
    fn order_limit_enforced() {
        let mut ledger = OrderLedger::new();
        ledger.create(BatchId(1));
        for i in 0..5 {
            ledger.append(BatchId(1), order(i)).unwrap();
        }
        assert!(ledger.is_full(BatchId(1)));

        let err = ledger.append(BatchId(1), order(10)).unwrap_err();
        assert!(matches!(
            err,
            OpensettleError::BatchFull {
                batch_id: BatchId(1),
                limit: 5,
            }
        ));
        assert_eq!(ledger.order_count(BatchId(1)), Some(5));
    }

    #[test]
    fn closed_batch_keeps_orders_readable() {
        let mut ledger = OrderLedger::new();
        ledger.create(BatchId(1));
        ledger.append(BatchId(1), order(1)).unwrap();
        ledger.append(BatchId(1), order(3)).unwrap();

        let count = ledger.close(BatchId(1)).unwrap();
        assert_eq!(count, 2);

        let batch = ledger.batch(BatchId(1)).unwrap();
        assert_eq!(batch.state, BatchState::Closed);
        assert_eq!(batch.order_count(), 2);
        assert_eq!(batch.orders[0], order(1));
    }

    #[test]
    fn commitment_is_deterministic_and_input_sensitive() {
        let actor = ActorId([5u8; 32]);
        let a = submission_commitment(actor, BatchId(1), 0);
        let b = submission_commitment(actor, BatchId(1), 0);
        assert_eq!(a, b);

        assert_ne!(a, submission_commitment(actor, BatchId(1), 1));
        assert_ne!(a, submission_commitment(actor, BatchId(2), 0));
        assert_ne!(a, submission_commitment(ActorId([6u8; 32]), BatchId(1), 0));
    }
}
