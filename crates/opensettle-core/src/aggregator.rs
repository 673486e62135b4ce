//! Homomorphic aggregation over a batch's ciphertext handles.
//!
//! Computes `sumQuantity = Σ qᵢ` and `sumValue = Σ (qᵢ·pᵢ)` entirely on
//! ciphertext. The fold is seeded from the first order rather than an
//! encrypted zero constant, so the backend never has to mint a fresh zero
//! ciphertext; the batch is required non-empty at call time.

use opensettle_fhe::FheBackend;
use opensettle_types::{Batch, CiphertextHandle, OpensettleError, Result};

/// Encrypted batch totals plus every handle that contributed to them.
#[derive(Debug, Clone)]
pub struct BatchAggregate {
    /// Handle for `Σ quantity_i`.
    pub sum_quantity: CiphertextHandle,
    /// Handle for `Σ (quantity_i × price_i)`.
    pub sum_value: CiphertextHandle,
    /// All input handles in fold order: `[q₀, p₀, q₁, p₁, ...]`. The
    /// decryption coordinator binds the request's integrity hash to exactly
    /// this list.
    pub bound_handles: Vec<CiphertextHandle>,
}

/// Fold a batch's orders into encrypted totals.
///
/// # Errors
/// - [`OpensettleError::EmptyBatch`] if the batch has no orders
/// - [`OpensettleError::UninitializedHandle`] if any contributing handle is
///   not a validly-initialized ciphertext
pub fn aggregate_batch<B: FheBackend>(fhe: &mut B, batch: &Batch) -> Result<BatchAggregate> {
    let first = batch
        .orders
        .first()
        .ok_or(OpensettleError::EmptyBatch(batch.id))?;

    // Every handle must be a live ciphertext before any fold step runs.
    let mut bound_handles = Vec::with_capacity(batch.orders.len() * 2);
    for order in &batch.orders {
        for handle in [order.quantity, order.price] {
            if !fhe.is_initialized(handle) {
                return Err(OpensettleError::UninitializedHandle(handle));
            }
            bound_handles.push(handle);
        }
    }

    let mut sum_quantity = first.quantity;
    let mut sum_value = fhe.multiply(first.quantity, first.price)?;

    for order in &batch.orders[1..] {
        sum_quantity = fhe.add(sum_quantity, order.quantity)?;
        let line_value = fhe.multiply(order.quantity, order.price)?;
        sum_value = fhe.add(sum_value, line_value)?;
    }

    Ok(BatchAggregate {
        sum_quantity,
        sum_value,
        bound_handles,
    })
}
