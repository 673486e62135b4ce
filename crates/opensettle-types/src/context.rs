//! Decryption request tracking types.
//!
//! Every call to `request_summary` records a [`DecryptionContext`] keyed by
//! the capability-issued `RequestId`. The context binds the request to the
//! exact ciphertext handles the aggregate was computed from; the eventual
//! callback is validated against it. Contexts are never deleted — a resolved
//! context (`processed = true`) stays behind as an audit record, and a
//! context whose callback never arrives stays pending forever.

use serde::{Deserialize, Serialize};

use crate::{BatchId, CiphertextHandle, RequestId};

/// Pending (or resolved) decryption request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptionContext {
    /// The batch the aggregate was computed over.
    pub batch_id: BatchId,
    /// Every ciphertext handle that contributed to the aggregate, in the
    /// order they were folded. The callback-time integrity check recomputes
    /// over exactly this list, never over current ledger state.
    pub bound_handles: Vec<CiphertextHandle>,
    /// SHA-256 binding of `bound_handles` and the engine instance tag,
    /// computed at request time.
    pub integrity_hash: [u8; 32],
    /// Whether the callback has been accepted. Transitions `false → true`
    /// at most once.
    pub processed: bool,
}

/// The completion record produced by a validated decryption callback.
///
/// This is the sole path by which plaintext aggregate values become
/// observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// The decryption request this report resolves.
    pub request_id: RequestId,
    /// The batch the totals cover.
    pub batch_id: BatchId,
    /// Decrypted `Σ quantity_i` over the batch.
    pub total_volume: u64,
    /// Decrypted `Σ (quantity_i × price_i)` over the batch.
    pub total_value: u64,
}
