//! The settlement engine facade.
//!
//! `SettlementEngine` owns every component plus the injected homomorphic
//! backend and exposes the full operation surface: role management, batch
//! lifecycle, order admission, summary requests, and the inbound decryption
//! callback. All process state lives in engine fields — no ambient globals —
//! so independent instances coexist in tests.
//!
//! Every operation validates completely before mutating anything: an error
//! return leaves the engine exactly as it was. Callers serialize mutating
//! operations per instance (`&mut self` enforces the single critical
//! section); read-only queries borrow immutably and always observe a
//! consistent snapshot.

use chrono::Utc;
use opensettle_fhe::FheBackend;
use opensettle_types::{
    ActionKind, ActorId, AuditEvent, AuditRecord, Batch, BatchId, CiphertextHandle, EngineConfig,
    OpensettleError, Order, RequestId, Result, SummaryReport, constants,
};

use crate::access::AccessControl;
use crate::aggregator::aggregate_batch;
use crate::batch_manager::BatchManager;
use crate::coordinator::DecryptionCoordinator;
use crate::ledger::{OrderLedger, submission_commitment};
use crate::rate_limit::RateLimiter;

/// One engine instance: access control, rate limiting, batch state, and the
/// decryption protocol, orchestrated over an injected [`FheBackend`].
pub struct SettlementEngine<B: FheBackend> {
    fhe: B,
    access: AccessControl,
    limiter: RateLimiter,
    batches: BatchManager,
    ledger: OrderLedger,
    coordinator: DecryptionCoordinator,
    /// Current cooldown applied to rate-limited actions, in seconds.
    cooldown_secs: u64,
    /// Append-only audit trail; the external read interface.
    audit: Vec<AuditRecord>,
}

impl<B: FheBackend> SettlementEngine<B> {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new(owner: ActorId, fhe: B) -> Self {
        Self::with_config(owner, fhe, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(owner: ActorId, fhe: B, config: EngineConfig) -> Self {
        Self {
            fhe,
            access: AccessControl::new(owner),
            limiter: RateLimiter::new(),
            batches: BatchManager::new(),
            ledger: OrderLedger::with_limit(config.max_orders_per_batch),
            coordinator: DecryptionCoordinator::new(),
            cooldown_secs: config.cooldown_secs,
            audit: Vec::new(),
        }
    }

    // =====================================================================
    // Role and configuration management (owner)
    // =====================================================================

    /// Authorize `provider` to submit orders and request summaries.
    /// Idempotent: re-adding an existing provider is a silent no-op.
    pub fn add_provider(&mut self, caller: ActorId, provider: ActorId) -> Result<()> {
        self.access.require_owner(caller)?;
        if self.access.add_provider(provider) {
            self.record(AuditEvent::ProviderAdded { provider });
        }
        Ok(())
    }

    /// Revoke `provider`. Idempotent: removing a non-provider is a no-op.
    pub fn remove_provider(&mut self, caller: ActorId, provider: ActorId) -> Result<()> {
        self.access.require_owner(caller)?;
        if self.access.remove_provider(provider) {
            self.record(AuditEvent::ProviderRemoved { provider });
        }
        Ok(())
    }

    /// Set the system-wide pause flag.
    pub fn set_paused(&mut self, caller: ActorId, paused: bool) -> Result<()> {
        self.access.require_owner(caller)?;
        if self.access.set_paused(paused) {
            self.record(AuditEvent::PauseSet { paused });
        }
        Ok(())
    }

    /// Set the action cooldown.
    ///
    /// # Errors
    /// Returns [`OpensettleError::ZeroCooldown`] if `cooldown_secs == 0`.
    pub fn set_cooldown_secs(&mut self, caller: ActorId, cooldown_secs: u64) -> Result<()> {
        self.access.require_owner(caller)?;
        if cooldown_secs == 0 {
            return Err(OpensettleError::ZeroCooldown);
        }
        self.cooldown_secs = cooldown_secs;
        self.record(AuditEvent::CooldownChanged { cooldown_secs });
        Ok(())
    }

    // =====================================================================
    // Batch lifecycle (owner)
    // =====================================================================

    /// Open a new batch. Exactly one batch may be open at a time.
    pub fn open_batch(&mut self, caller: ActorId) -> Result<BatchId> {
        self.access.require_owner(caller)?;
        self.access.require_active()?;
        let batch_id = self.batches.open_batch()?;
        self.ledger.create(batch_id);
        tracing::info!(%batch_id, "batch opened");
        self.record(AuditEvent::BatchOpened { batch_id });
        Ok(batch_id)
    }

    /// Close the open batch. Its orders stay readable for aggregation.
    pub fn close_batch(&mut self, caller: ActorId) -> Result<BatchId> {
        self.access.require_owner(caller)?;
        self.access.require_active()?;
        let batch_id = self.batches.close_batch()?;
        let order_count = self.ledger.close(batch_id)?;
        tracing::info!(%batch_id, order_count, "batch closed");
        self.record(AuditEvent::BatchClosed {
            batch_id,
            order_count,
        });
        Ok(batch_id)
    }

    // =====================================================================
    // Order admission (provider)
    // =====================================================================

    /// Submit a confidential order into the open batch.
    ///
    /// Returns the order's index within the batch. The audit log records a
    /// one-way commitment over (submitter, batch id, index) — never the
    /// ciphertext handles.
    pub fn submit_order(
        &mut self,
        caller: ActorId,
        quantity: CiphertextHandle,
        price: CiphertextHandle,
        now: u64,
    ) -> Result<usize> {
        self.access.require_provider(caller)?;
        self.access.require_active()?;
        let batch_id = self.batches.require_open()?;
        if self.ledger.is_full(batch_id) {
            return Err(OpensettleError::BatchFull {
                batch_id,
                limit: self.ledger.max_orders(),
            });
        }
        self.limiter
            .check_and_record(caller, ActionKind::Submit, now, self.cooldown_secs)?;

        let index = self.ledger.append(batch_id, Order::new(quantity, price))?;
        let commitment = submission_commitment(caller, batch_id, index);
        tracing::info!(%batch_id, index, submitter = %caller, "order admitted");
        self.record(AuditEvent::OrderSubmitted {
            batch_id,
            index,
            commitment,
        });
        Ok(index)
    }

    // =====================================================================
    // Summary request and decryption callback
    // =====================================================================

    /// Request a decrypted aggregate summary for a non-empty batch.
    ///
    /// Fire-and-forget: returns the capability-issued [`RequestId`] after
    /// recording a pending context; the cleartexts arrive later via
    /// [`on_decryption_callback`](Self::on_decryption_callback). There is
    /// no timeout, retry, or cancellation for an outstanding request.
    pub fn request_summary(
        &mut self,
        caller: ActorId,
        batch_id: BatchId,
        now: u64,
    ) -> Result<RequestId> {
        self.access.require_provider(caller)?;
        self.access.require_active()?;
        let batch = self.ledger.require_batch(batch_id)?;
        if batch.is_empty() {
            return Err(OpensettleError::EmptyBatch(batch_id));
        }
        self.limiter
            .check(caller, ActionKind::Decrypt, now, self.cooldown_secs)?;

        let aggregate = aggregate_batch(&mut self.fhe, batch)?;
        let request_id = self
            .fhe
            .request_decryption(&[aggregate.sum_quantity, aggregate.sum_value])?;

        self.limiter.record(caller, ActionKind::Decrypt, now);
        let handle_count = aggregate.bound_handles.len();
        self.coordinator
            .register(request_id, batch_id, aggregate.bound_handles);
        tracing::info!(%request_id, %batch_id, handle_count, "summary decryption requested");
        self.record(AuditEvent::DecryptionRequested {
            request_id,
            batch_id,
            handle_count,
        });
        Ok(request_id)
    }

    /// Inbound decryption callback from the trusted oracle.
    ///
    /// Validates, in order: caller identity, replay (context exists and is
    /// unprocessed), integrity hash over the stored bound handles, and the
    /// decryption proof. On success the context is marked processed exactly
    /// once and the completion record is emitted.
    ///
    /// An integrity failure is terminal for this `request_id`: the context
    /// stays unprocessed and no automatic remediation exists.
    pub fn on_decryption_callback(
        &mut self,
        caller: ActorId,
        request_id: RequestId,
        cleartexts: &[u64],
        proof: &[u8],
    ) -> Result<SummaryReport> {
        if caller != self.fhe.oracle_identity() {
            return Err(OpensettleError::UntrustedCallback(caller));
        }
        self.coordinator.verify_pending(request_id)?;
        if !self.fhe.verify_proof(request_id, cleartexts, proof) {
            tracing::warn!(%request_id, "decryption proof failed verification");
            return Err(OpensettleError::InvalidProof(request_id));
        }
        if cleartexts.len() != constants::SUMMARY_CLEARTEXT_COUNT {
            return Err(OpensettleError::MalformedCleartexts {
                expected: constants::SUMMARY_CLEARTEXT_COUNT,
                got: cleartexts.len(),
            });
        }
        let (total_volume, total_value) = (cleartexts[0], cleartexts[1]);

        let batch_id = self.coordinator.mark_processed(request_id)?;
        tracing::info!(%request_id, %batch_id, total_volume, total_value, "summary decrypted");
        self.record(AuditEvent::DecryptionCompleted {
            request_id,
            batch_id,
            total_volume,
            total_value,
        });
        Ok(SummaryReport {
            request_id,
            batch_id,
            total_volume,
            total_value,
        })
    }

    // =====================================================================
    // Read-only queries
    // =====================================================================

    /// The currently open batch id, if any.
    #[must_use]
    pub fn open_batch_id(&self) -> Option<BatchId> {
        self.batches.open_id()
    }

    /// Look up a batch (open or closed) by id.
    #[must_use]
    pub fn batch(&self, batch_id: BatchId) -> Option<&Batch> {
        self.ledger.batch(batch_id)
    }

    /// Order count of a batch, if it exists.
    #[must_use]
    pub fn order_count(&self, batch_id: BatchId) -> Option<usize> {
        self.ledger.order_count(batch_id)
    }

    /// Whether a decryption request has been processed, if it exists.
    #[must_use]
    pub fn is_processed(&self, request_id: RequestId) -> Option<bool> {
        self.coordinator.is_processed(request_id)
    }

    /// Number of decryption requests still awaiting their callback.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.coordinator.pending_count()
    }

    /// The append-only audit trail.
    #[must_use]
    pub fn audit_log(&self) -> &[AuditRecord] {
        &self.audit
    }

    #[must_use]
    pub fn owner(&self) -> ActorId {
        self.access.owner()
    }

    #[must_use]
    pub fn is_provider(&self, actor: ActorId) -> bool {
        self.access.is_provider(actor)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    #[must_use]
    pub fn cooldown_secs(&self) -> u64 {
        self.cooldown_secs
    }

    /// Borrow the homomorphic backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.fhe
    }

    /// Mutably borrow the homomorphic backend (e.g. to encrypt test inputs).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.fhe
    }

    fn record(&mut self, event: AuditEvent) {
        self.audit.push(AuditRecord {
            seq: self.audit.len() as u64,
            at: Utc::now(),
            event,
        });
    }
}
