//! Audit trail types for the OpenSettle engine.
//!
//! Every successful mutating operation appends an [`AuditRecord`] to the
//! engine's append-only log. The log is the sole read interface for
//! external observers (dashboards, monitoring); it never contains raw
//! ciphertext handles — order submissions are recorded as one-way
//! commitment hashes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ActorId, BatchId, RequestId};

/// What happened. Variants carry only audit-safe data: identities, ids,
/// commitment hashes, and (for completed decryptions) the aggregate totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEvent {
    /// A provider identity was added to the authorized set.
    ProviderAdded { provider: ActorId },
    /// A provider identity was removed from the authorized set.
    ProviderRemoved { provider: ActorId },
    /// The system-wide pause flag changed.
    PauseSet { paused: bool },
    /// The action cooldown was changed.
    CooldownChanged { cooldown_secs: u64 },
    /// A new batch was opened.
    BatchOpened { batch_id: BatchId },
    /// The open batch was closed.
    BatchClosed { batch_id: BatchId, order_count: usize },
    /// An order was admitted. The commitment is a SHA-256 hash over the
    /// submitter identity, batch id, and order index — never the handles.
    OrderSubmitted {
        batch_id: BatchId,
        index: usize,
        commitment: [u8; 32],
    },
    /// An aggregate decryption was requested.
    DecryptionRequested {
        request_id: RequestId,
        batch_id: BatchId,
        handle_count: usize,
    },
    /// A decryption callback was validated and accepted.
    DecryptionCompleted {
        request_id: RequestId,
        batch_id: BatchId,
        total_volume: u64,
        total_value: u64,
    },
}

impl AuditEvent {
    /// Stable event name for log aggregation.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProviderAdded { .. } => "PROVIDER_ADDED",
            Self::ProviderRemoved { .. } => "PROVIDER_REMOVED",
            Self::PauseSet { .. } => "PAUSE_SET",
            Self::CooldownChanged { .. } => "COOLDOWN_CHANGED",
            Self::BatchOpened { .. } => "BATCH_OPENED",
            Self::BatchClosed { .. } => "BATCH_CLOSED",
            Self::OrderSubmitted { .. } => "ORDER_SUBMITTED",
            Self::DecryptionRequested { .. } => "DECRYPTION_REQUESTED",
            Self::DecryptionCompleted { .. } => "DECRYPTION_COMPLETED",
        }
    }
}

/// One entry in the append-only audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Position in the log, starting at 0.
    pub seq: u64,
    /// When the record was appended.
    pub at: DateTime<Utc>,
    /// What happened.
    pub event: AuditEvent,
}
