//! # opensettle-fhe
//!
//! The homomorphic-encryption boundary of OpenSettle.
//!
//! The engine never implements cryptography; it consumes a capability that
//! can add and multiply ciphertexts, asynchronously decrypt a set of
//! handles, and verify decryption proofs. That capability is the
//! [`FheBackend`] trait.
//!
//! Two implementations ship with the workspace:
//! - a production deployment plugs in an adapter over its FHE service
//!   (out of scope here), and
//! - [`MockFhe`], a deterministic in-memory backend that stores `u64`
//!   plaintexts behind opaque handles and does the arithmetic directly,
//!   so the orchestration logic is testable without real cryptography.

pub mod backend;
pub mod mock;

pub use backend::FheBackend;
pub use mock::MockFhe;
