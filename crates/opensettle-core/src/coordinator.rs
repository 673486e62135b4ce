//! Asynchronous decryption request tracking.
//!
//! Each summary request is recorded as a [`DecryptionContext`] keyed by the
//! capability-issued `RequestId`. The context binds the request to the
//! exact ciphertext handles the aggregate was computed from, hashed
//! together with a per-instance tag so a callback captured from one engine
//! instance cannot be replayed against another.
//!
//! Contexts are never deleted. A processed context blocks replays; a
//! context whose callback never arrives stays pending forever — the
//! fail-stationary policy, surfaced through [`pending_count`] and
//! [`is_processed`].
//!
//! [`pending_count`]: DecryptionCoordinator::pending_count
//! [`is_processed`]: DecryptionCoordinator::is_processed

use std::collections::HashMap;

use opensettle_types::{BatchId, CiphertextHandle, DecryptionContext, OpensettleError, RequestId, Result};
use sha2::{Digest, Sha256};

/// Pending-request table with replay and integrity protection.
pub struct DecryptionCoordinator {
    contexts: HashMap<RequestId, DecryptionContext>,
    /// Random per-instance tag mixed into every integrity hash.
    instance_tag: [u8; 32],
}

impl DecryptionCoordinator {
    /// Create a coordinator with a random instance tag.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tag(rand::random())
    }

    /// Create a coordinator with a fixed instance tag.
    #[must_use]
    pub fn with_tag(instance_tag: [u8; 32]) -> Self {
        Self {
            contexts: HashMap::new(),
            instance_tag,
        }
    }

    /// Hash binding a handle list to this instance.
    #[must_use]
    pub fn integrity_hash(&self, handles: &[CiphertextHandle]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"opensettle:summary:v1:");
        hasher.update(self.instance_tag);
        hasher.update((handles.len() as u64).to_le_bytes());
        for handle in handles {
            hasher.update(handle.as_bytes());
        }
        let digest = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        hash
    }

    /// Record a freshly issued decryption request.
    pub fn register(
        &mut self,
        request_id: RequestId,
        batch_id: BatchId,
        bound_handles: Vec<CiphertextHandle>,
    ) {
        let integrity_hash = self.integrity_hash(&bound_handles);
        self.contexts.insert(
            request_id,
            DecryptionContext {
                batch_id,
                bound_handles,
                integrity_hash,
                processed: false,
            },
        );
    }

    /// Validate a callback target: the context must exist, be unprocessed,
    /// and its recorded integrity hash must equal the hash recomputed from
    /// the **stored** bound handles (never re-derived from ledger state).
    ///
    /// # Errors
    /// - [`OpensettleError::ReplayDetected`] for an unknown or already
    ///   processed request
    /// - [`OpensettleError::StateMismatch`] if the recomputed hash diverges
    pub fn verify_pending(&self, request_id: RequestId) -> Result<&DecryptionContext> {
        let ctx = self
            .contexts
            .get(&request_id)
            .ok_or(OpensettleError::ReplayDetected(request_id))?;
        if ctx.processed {
            return Err(OpensettleError::ReplayDetected(request_id));
        }
        if self.integrity_hash(&ctx.bound_handles) != ctx.integrity_hash {
            return Err(OpensettleError::StateMismatch(request_id));
        }
        Ok(ctx)
    }

    /// Flip `processed` false → true, returning the context's batch id.
    ///
    /// # Errors
    /// Returns [`OpensettleError::ReplayDetected`] if the context is
    /// unknown or already processed.
    pub fn mark_processed(&mut self, request_id: RequestId) -> Result<BatchId> {
        let ctx = self
            .contexts
            .get_mut(&request_id)
            .ok_or(OpensettleError::ReplayDetected(request_id))?;
        if ctx.processed {
            return Err(OpensettleError::ReplayDetected(request_id));
        }
        ctx.processed = true;
        Ok(ctx.batch_id)
    }

    /// Look up a context (processed or not).
    #[must_use]
    pub fn context(&self, request_id: RequestId) -> Option<&DecryptionContext> {
        self.contexts.get(&request_id)
    }

    /// Mutable context access, crate-internal only: external mutation of a
    /// stored context would defeat the integrity binding.
    pub(crate) fn context_mut(&mut self, request_id: RequestId) -> Option<&mut DecryptionContext> {
        self.contexts.get_mut(&request_id)
    }

    /// Whether a request has been processed, if it exists.
    #[must_use]
    pub fn is_processed(&self, request_id: RequestId) -> Option<bool> {
        self.contexts.get(&request_id).map(|c| c.processed)
    }

    /// Number of requests still awaiting a callback.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.contexts.values().filter(|c| !c.processed).count()
    }
}

impl Default for DecryptionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
