//! The external decryption/FHE capability consumed by the engine.

use opensettle_types::{ActorId, CiphertextHandle, RequestId, Result};

/// Abstract homomorphic backend.
///
/// Handles are opaque: the engine never learns the plaintext behind one.
/// `add` and `multiply` take `&mut self` because producing a result
/// ciphertext mints a new handle inside the backend.
///
/// `request_decryption` is the asynchronous half of the protocol: it
/// returns immediately with a [`RequestId`]; the decrypted cleartexts and
/// their proof arrive later through an inbound callback attributed to
/// [`oracle_identity`](FheBackend::oracle_identity). The engine treats a
/// backend that never calls back as a request left pending forever.
pub trait FheBackend {
    /// Homomorphic addition: returns a handle whose plaintext is the sum
    /// of the operands' plaintexts.
    fn add(&mut self, a: CiphertextHandle, b: CiphertextHandle) -> Result<CiphertextHandle>;

    /// Homomorphic multiplication: returns a handle whose plaintext is the
    /// product of the operands' plaintexts.
    fn multiply(&mut self, a: CiphertextHandle, b: CiphertextHandle) -> Result<CiphertextHandle>;

    /// Whether `handle` refers to a validly-initialized ciphertext.
    fn is_initialized(&self, handle: CiphertextHandle) -> bool;

    /// Submit a set of handles for asynchronous decryption.
    fn request_decryption(&mut self, handles: &[CiphertextHandle]) -> Result<RequestId>;

    /// Verify the proof delivered with a decryption callback.
    fn verify_proof(&self, request_id: RequestId, cleartexts: &[u64], proof: &[u8]) -> bool;

    /// The sole identity permitted to deliver decryption callbacks.
    fn oracle_identity(&self) -> ActorId;
}
