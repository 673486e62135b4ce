//! Deterministic in-memory mock backend.
//!
//! `MockFhe` stores `u64` plaintexts behind hash-derived opaque handles and
//! implements the homomorphic operations arithmetically. Decryption is
//! two-phase like the real protocol: `request_decryption` parks the handles
//! under a fresh `RequestId`, and the test harness later calls
//! [`MockFhe::deliver`] to obtain the cleartexts plus a proof that
//! `verify_proof` will accept.

use std::collections::HashMap;

use opensettle_types::{ActorId, CiphertextHandle, OpensettleError, RequestId, Result};
use sha2::{Digest, Sha256};

use crate::backend::FheBackend;

/// In-memory stand-in for the decryption/FHE service.
pub struct MockFhe {
    /// Plaintext behind each minted handle.
    plaintexts: HashMap<CiphertextHandle, u64>,
    /// Counter feeding handle derivation.
    next_handle: u64,
    /// Handles parked per outstanding decryption request.
    pending: HashMap<RequestId, Vec<CiphertextHandle>>,
    /// The trusted callback identity this mock impersonates.
    identity: ActorId,
}

impl MockFhe {
    #[must_use]
    pub fn new() -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"opensettle:mock-oracle:v1");
        let digest = hasher.finalize();
        let mut identity = [0u8; 32];
        identity.copy_from_slice(&digest);
        Self::with_identity(ActorId(identity))
    }

    /// Create a mock whose callbacks are attributed to `identity`.
    #[must_use]
    pub fn with_identity(identity: ActorId) -> Self {
        Self {
            plaintexts: HashMap::new(),
            next_handle: 0,
            pending: HashMap::new(),
            identity,
        }
    }

    /// Encrypt a value, minting a fresh opaque handle.
    pub fn encrypt(&mut self, value: u64) -> CiphertextHandle {
        let handle = self.mint_handle();
        self.plaintexts.insert(handle, value);
        handle
    }

    /// Produce the callback payload for an outstanding request: the
    /// cleartexts in request order and a proof binding them to the request.
    ///
    /// Returns `None` for an unknown `request_id`.
    #[must_use]
    pub fn deliver(&self, request_id: RequestId) -> Option<(Vec<u64>, Vec<u8>)> {
        let handles = self.pending.get(&request_id)?;
        let cleartexts: Vec<u64> = handles
            .iter()
            .map(|h| self.plaintexts.get(h).copied().unwrap_or(0))
            .collect();
        let proof = Self::compute_proof(request_id, &cleartexts);
        Some((cleartexts, proof))
    }

    /// Look up the plaintext behind a handle (test inspection only).
    #[must_use]
    pub fn plaintext(&self, handle: CiphertextHandle) -> Option<u64> {
        self.plaintexts.get(&handle).copied()
    }

    /// Number of outstanding decryption requests.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    fn mint_handle(&mut self) -> CiphertextHandle {
        let mut hasher = Sha256::new();
        hasher.update(b"opensettle:mockct:v1:");
        hasher.update(self.next_handle.to_le_bytes());
        self.next_handle += 1;
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        CiphertextHandle(bytes)
    }

    fn plaintext_of(&self, handle: CiphertextHandle) -> Result<u64> {
        self.plaintexts
            .get(&handle)
            .copied()
            .ok_or(OpensettleError::UninitializedHandle(handle))
    }

    fn compute_proof(request_id: RequestId, cleartexts: &[u64]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(b"opensettle:mockproof:v1:");
        hasher.update(request_id.0.as_bytes());
        hasher.update((cleartexts.len() as u64).to_le_bytes());
        for value in cleartexts {
            hasher.update(value.to_le_bytes());
        }
        hasher.finalize().to_vec()
    }
}

impl Default for MockFhe {
    fn default() -> Self {
        Self::new()
    }
}

impl FheBackend for MockFhe {
    fn add(&mut self, a: CiphertextHandle, b: CiphertextHandle) -> Result<CiphertextHandle> {
        let lhs = self.plaintext_of(a)?;
        let rhs = self.plaintext_of(b)?;
        let sum = lhs
            .checked_add(rhs)
            .ok_or_else(|| OpensettleError::Internal("ciphertext addition overflow".into()))?;
        Ok(self.encrypt(sum))
    }

    fn multiply(&mut self, a: CiphertextHandle, b: CiphertextHandle) -> Result<CiphertextHandle> {
        let lhs = self.plaintext_of(a)?;
        let rhs = self.plaintext_of(b)?;
        let product = lhs
            .checked_mul(rhs)
            .ok_or_else(|| OpensettleError::Internal("ciphertext multiplication overflow".into()))?;
        Ok(self.encrypt(product))
    }

    fn is_initialized(&self, handle: CiphertextHandle) -> bool {
        self.plaintexts.contains_key(&handle)
    }

    fn request_decryption(&mut self, handles: &[CiphertextHandle]) -> Result<RequestId> {
        for handle in handles {
            if !self.is_initialized(*handle) {
                return Err(OpensettleError::UninitializedHandle(*handle));
            }
        }
        let request_id = RequestId::new();
        self.pending.insert(request_id, handles.to_vec());
        Ok(request_id)
    }

    fn verify_proof(&self, request_id: RequestId, cleartexts: &[u64], proof: &[u8]) -> bool {
        Self::compute_proof(request_id, cleartexts) == proof
    }

    fn oracle_identity(&self) -> ActorId {
        self.identity
    }
}
