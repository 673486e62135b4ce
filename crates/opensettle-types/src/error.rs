//! Error types for the OpenSettle settlement engine.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors
//! - 2xx: Lifecycle errors
//! - 3xx: Rate limit errors
//! - 4xx: Validation errors
//! - 5xx: Integrity errors
//! - 9xx: General / internal errors
//!
//! Every check runs before any state mutation: an error return always
//! leaves the engine unchanged.

use thiserror::Error;

use crate::{ActionKind, ActorId, BatchId, CiphertextHandle, RequestId};

/// Central error enum for all OpenSettle operations.
#[derive(Debug, Error)]
pub enum OpensettleError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The caller is not the engine owner.
    #[error("OS_ERR_100: Caller is not the owner: {0}")]
    NotOwner(ActorId),

    /// The caller is not an authorized data provider.
    #[error("OS_ERR_101: Caller is not a registered provider: {0}")]
    NotProvider(ActorId),

    /// A decryption callback arrived from an identity other than the
    /// trusted oracle.
    #[error("OS_ERR_102: Decryption callback from untrusted caller: {0}")]
    UntrustedCallback(ActorId),

    // =================================================================
    // Lifecycle Errors (2xx)
    // =================================================================
    /// The engine is paused; state-changing operations are rejected.
    #[error("OS_ERR_200: Engine is paused")]
    EnginePaused,

    /// `open_batch` was called while a batch is already open.
    #[error("OS_ERR_201: A batch is already open: {0}")]
    BatchAlreadyOpen(BatchId),

    /// The operation requires an open batch and none exists.
    #[error("OS_ERR_202: No batch is open")]
    NoOpenBatch,

    /// No batch with the given id exists.
    #[error("OS_ERR_203: Batch not found: {0}")]
    BatchNotFound(BatchId),

    /// The open batch already holds the maximum number of orders.
    #[error("OS_ERR_204: Batch {batch_id} is full (limit {limit})")]
    BatchFull { batch_id: BatchId, limit: usize },

    // =================================================================
    // Rate Limit Errors (3xx)
    // =================================================================
    /// The per-actor cooldown for this action has not elapsed.
    #[error("OS_ERR_300: Cooldown active for {action}: {remaining_secs}s remaining")]
    CooldownActive {
        action: ActionKind,
        remaining_secs: u64,
    },

    // =================================================================
    // Validation Errors (4xx)
    // =================================================================
    /// The cooldown must be strictly positive.
    #[error("OS_ERR_400: Cooldown must be greater than zero")]
    ZeroCooldown,

    /// Aggregation requires at least one order in the batch.
    #[error("OS_ERR_401: Batch {0} has no orders to aggregate")]
    EmptyBatch(BatchId),

    // =================================================================
    // Integrity Errors (5xx)
    // =================================================================
    /// The callback targets an unknown or already-processed request.
    #[error("OS_ERR_500: Replay detected for request {0}")]
    ReplayDetected(RequestId),

    /// The integrity hash recomputed from the stored bound handles does not
    /// match the hash recorded at request time.
    #[error("OS_ERR_501: State hash mismatch for request {0}")]
    StateMismatch(RequestId),

    /// The decryption proof failed verification.
    #[error("OS_ERR_502: Invalid decryption proof for request {0}")]
    InvalidProof(RequestId),

    /// A contributing handle is not a validly-initialized ciphertext.
    #[error("OS_ERR_503: Uninitialized ciphertext handle: {0}")]
    UninitializedHandle(CiphertextHandle),

    /// The callback cleartexts do not decode to the expected aggregate pair.
    #[error("OS_ERR_504: Malformed cleartexts: expected {expected} values, got {got}")]
    MalformedCleartexts { expected: usize, got: usize },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OS_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpensettleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = OpensettleError::NotOwner(ActorId([0u8; 32]));
        let msg = format!("{err}");
        assert!(msg.starts_with("OS_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn cooldown_display() {
        let err = OpensettleError::CooldownActive {
            action: ActionKind::Submit,
            remaining_secs: 42,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_300"));
        assert!(msg.contains("SUBMIT"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn batch_full_display() {
        let err = OpensettleError::BatchFull {
            batch_id: BatchId(3),
            limit: 5,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_204"));
        assert!(msg.contains("batch:3"));
        assert!(msg.contains('5'));
    }

    #[test]
    fn all_errors_have_os_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(OpensettleError::EnginePaused),
            Box::new(OpensettleError::NoOpenBatch),
            Box::new(OpensettleError::ZeroCooldown),
            Box::new(OpensettleError::ReplayDetected(RequestId::new())),
            Box::new(OpensettleError::UninitializedHandle(CiphertextHandle(
                [0u8; 32],
            ))),
            Box::new(OpensettleError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OS_ERR_"),
                "Error missing OS_ERR_ prefix: {msg}"
            );
        }
    }
}
