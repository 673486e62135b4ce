//! End-to-end integration tests for the confidential settlement cycle.
//!
//! These tests exercise the full lifecycle against the mock backend:
//! role setup -> batch open -> encrypted order admission -> homomorphic
//! aggregation -> asynchronous decryption callback -> verified summary.
//!
//! They verify that the components work together correctly in realistic
//! scenarios: multi-provider batches, pause gating, cooldown windows,
//! replay rejection, and pending requests that outlive batch turnover.

use opensettle_core::SettlementEngine;
use opensettle_fhe::{FheBackend, MockFhe};
use opensettle_types::*;

const OWNER: ActorId = ActorId([0x01; 32]);
const ALICE: ActorId = ActorId([0xA1; 32]);
const BOB: ActorId = ActorId([0xB0; 32]);

/// Helper: engine with registered providers and a short cooldown.
struct Harness {
    engine: SettlementEngine<MockFhe>,
    /// Monotonic clock handed to rate-limited operations, in unix seconds.
    now: u64,
}

impl Harness {
    fn new(cooldown_secs: u64) -> Self {
        let config = EngineConfig {
            cooldown_secs,
            ..EngineConfig::default()
        };
        let mut engine = SettlementEngine::with_config(OWNER, MockFhe::new(), config);
        engine.add_provider(OWNER, ALICE).expect("add alice");
        engine.add_provider(OWNER, BOB).expect("add bob");
        Self { engine, now: 1_000 }
    }

    /// Advance the clock past one full cooldown window.
    fn wait_cooldown(&mut self) {
        self.now += self.engine.cooldown_secs();
    }

    fn submit(&mut self, provider: ActorId, quantity: u64, price: u64) -> Result<usize> {
        let q = self.engine.backend_mut().encrypt(quantity);
        let p = self.engine.backend_mut().encrypt(price);
        self.engine.submit_order(provider, q, p, self.now)
    }

    fn request_summary(&mut self, provider: ActorId, batch_id: BatchId) -> Result<RequestId> {
        self.engine.request_summary(provider, batch_id, self.now)
    }

    /// Play the oracle: deliver the pending cleartexts for `request_id`.
    fn deliver_callback(&mut self, request_id: RequestId) -> Result<SummaryReport> {
        let oracle = self.engine.backend().oracle_identity();
        let (cleartexts, proof) = self
            .engine
            .backend()
            .deliver(request_id)
            .expect("request should be pending at the backend");
        self.engine
            .on_decryption_callback(oracle, request_id, &cleartexts, &proof)
    }

    fn completion_count(&self) -> usize {
        self.engine
            .audit_log()
            .iter()
            .filter(|r| matches!(r.event, AuditEvent::DecryptionCompleted { .. }))
            .count()
    }
}

// =============================================================================
// Test: the canonical settlement scenario
// =============================================================================
#[test]
fn e2e_two_orders_summary_and_replay() {
    let mut h = Harness::new(60);

    let batch_id = h.engine.open_batch(OWNER).expect("open batch");
    assert_eq!(batch_id, BatchId(1));

    h.submit(ALICE, 100, 5).expect("first order");
    let err = h.submit(ALICE, 50, 8).expect_err("still cooling down");
    assert!(matches!(err, OpensettleError::CooldownActive { .. }));

    h.wait_cooldown();
    h.submit(ALICE, 50, 8).expect("second order after cooldown");
    assert_eq!(h.engine.order_count(batch_id), Some(2));

    let request_id = h.request_summary(ALICE, batch_id).expect("summary request");
    assert_eq!(h.engine.is_processed(request_id), Some(false));

    let report = h.deliver_callback(request_id).expect("valid callback");
    assert_eq!(report.batch_id, BatchId(1));
    assert_eq!(report.total_volume, 150); // 100 + 50
    assert_eq!(report.total_value, 900); // 100*5 + 50*8
    assert_eq!(h.engine.is_processed(request_id), Some(true));
    assert_eq!(h.completion_count(), 1);

    // Replaying the exact same callback must fail and emit nothing.
    let err = h.deliver_callback(request_id).expect_err("replay");
    assert!(matches!(err, OpensettleError::ReplayDetected(r) if r == request_id));
    assert_eq!(h.completion_count(), 1);
}

// =============================================================================
// Test: multi-provider batch with independent cooldowns
// =============================================================================
#[test]
fn e2e_multi_provider_batch() {
    let mut h = Harness::new(60);
    let batch_id = h.engine.open_batch(OWNER).unwrap();

    // Cooldowns are per-actor: Bob is not blocked by Alice's submission.
    h.submit(ALICE, 10, 2).unwrap();
    h.submit(BOB, 20, 3).unwrap();

    h.wait_cooldown();
    h.submit(ALICE, 30, 4).unwrap();

    let request_id = h.request_summary(BOB, batch_id).unwrap();
    let report = h.deliver_callback(request_id).unwrap();
    assert_eq!(report.total_volume, 60); // 10 + 20 + 30
    assert_eq!(report.total_value, 200); // 20 + 60 + 120
}

// =============================================================================
// Test: batches turn over while a decryption request stays pending
// =============================================================================
#[test]
fn e2e_pending_request_survives_batch_turnover() {
    let mut h = Harness::new(1);

    let first = h.engine.open_batch(OWNER).unwrap();
    h.submit(ALICE, 100, 5).unwrap();
    h.engine.close_batch(OWNER).unwrap();

    h.wait_cooldown();
    let request_id = h.request_summary(ALICE, first).unwrap();

    // New batch and orders proceed freely while the request is outstanding.
    let second = h.engine.open_batch(OWNER).unwrap();
    assert_eq!(second, BatchId(2));
    h.wait_cooldown();
    h.submit(BOB, 7, 7).unwrap();

    let report = h.deliver_callback(request_id).unwrap();
    assert_eq!(report.batch_id, first);
    assert_eq!(report.total_volume, 100);
    assert_eq!(report.total_value, 500);
}

// =============================================================================
// Test: repeated summaries for the same batch are independent requests
// =============================================================================
#[test]
fn e2e_concurrent_summaries_same_batch() {
    let mut h = Harness::new(1);
    let batch_id = h.engine.open_batch(OWNER).unwrap();
    h.submit(ALICE, 40, 10).unwrap();

    h.wait_cooldown();
    let first = h.request_summary(ALICE, batch_id).unwrap();
    let second = h.request_summary(BOB, batch_id).unwrap();
    assert_ne!(first, second);
    assert_eq!(h.engine.pending_requests(), 2);

    // Redundant but not unsafe: each resolves independently, once.
    let a = h.deliver_callback(first).unwrap();
    let b = h.deliver_callback(second).unwrap();
    assert_eq!((a.total_volume, a.total_value), (40, 400));
    assert_eq!((b.total_volume, b.total_value), (40, 400));
    assert_eq!(h.completion_count(), 2);
    assert_eq!(h.engine.pending_requests(), 0);
}

// =============================================================================
// Test: pause gates admission and summaries, owner ops recover
// =============================================================================
#[test]
fn e2e_pause_and_resume() {
    let mut h = Harness::new(1);
    let batch_id = h.engine.open_batch(OWNER).unwrap();
    h.submit(ALICE, 5, 5).unwrap();

    h.engine.set_paused(OWNER, true).unwrap();

    h.wait_cooldown();
    let err = h.submit(ALICE, 6, 6).unwrap_err();
    assert!(matches!(err, OpensettleError::EnginePaused));
    let err = h.request_summary(ALICE, batch_id).unwrap_err();
    assert!(matches!(err, OpensettleError::EnginePaused));
    let err = h.engine.close_batch(OWNER).unwrap_err();
    assert!(matches!(err, OpensettleError::EnginePaused));

    h.engine.set_paused(OWNER, false).unwrap();
    h.submit(ALICE, 6, 6).unwrap();
    assert_eq!(h.engine.order_count(batch_id), Some(2));
}

// =============================================================================
// Test: a capability that never calls back leaves the request pending
// =============================================================================
#[test]
fn e2e_undelivered_callback_is_fail_stationary() {
    let mut h = Harness::new(1);
    let batch_id = h.engine.open_batch(OWNER).unwrap();
    h.submit(ALICE, 9, 9).unwrap();

    h.wait_cooldown();
    let request_id = h.request_summary(ALICE, batch_id).unwrap();

    // No callback ever arrives. The context stays pending and observable;
    // the rest of the engine is unaffected.
    assert_eq!(h.engine.is_processed(request_id), Some(false));
    assert_eq!(h.engine.pending_requests(), 1);
    assert_eq!(h.completion_count(), 0);

    h.engine.close_batch(OWNER).unwrap();
    h.engine.open_batch(OWNER).unwrap();
    h.wait_cooldown();
    h.submit(ALICE, 1, 1).unwrap();
}

// =============================================================================
// Test: audit trail for a complete cycle, in order
// =============================================================================
#[test]
fn e2e_audit_trail_order() {
    let mut h = Harness::new(1);
    let batch_id = h.engine.open_batch(OWNER).unwrap();
    h.submit(ALICE, 100, 5).unwrap();
    h.engine.close_batch(OWNER).unwrap();
    h.wait_cooldown();
    let request_id = h.request_summary(ALICE, batch_id).unwrap();
    h.deliver_callback(request_id).unwrap();

    let kinds: Vec<_> = h
        .engine
        .audit_log()
        .iter()
        .map(|r| r.event.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "PROVIDER_ADDED", // alice
            "PROVIDER_ADDED", // bob
            "BATCH_OPENED",
            "ORDER_SUBMITTED",
            "BATCH_CLOSED",
            "DECRYPTION_REQUESTED",
            "DECRYPTION_COMPLETED",
        ]
    );

    // The submission record carries a commitment, never raw handles.
    let submitted = h
        .engine
        .audit_log()
        .iter()
        .find_map(|r| match r.event {
            AuditEvent::OrderSubmitted { commitment, .. } => Some(commitment),
            _ => None,
        })
        .expect("submission audited");
    assert_ne!(submitted, [0u8; 32]);
}

// =============================================================================
// Test: independent engine instances do not share state
// =============================================================================
#[test]
fn e2e_instances_are_isolated() {
    let mut a = Harness::new(1);
    let mut b = Harness::new(1);

    a.engine.open_batch(OWNER).unwrap();
    assert_eq!(a.engine.open_batch_id(), Some(BatchId(1)));
    assert_eq!(b.engine.open_batch_id(), None);

    a.submit(ALICE, 3, 3).unwrap();
    // Alice's cooldown in engine A does not constrain engine B.
    b.engine.open_batch(OWNER).unwrap();
    b.submit(ALICE, 4, 4).unwrap();
}
