//! # opensettle-core
//!
//! The confidential batch settlement engine.
//!
//! ## Architecture
//!
//! The engine orchestrates six components around an injected
//! [`FheBackend`](opensettle_fhe::FheBackend):
//!
//! 1. **`AccessControl`**: single owner, mutable provider set, pause flag
//! 2. **`RateLimiter`**: per-(actor, action) cooldown enforcement
//! 3. **`BatchManager`**: at most one open batch; monotonic id allocation
//! 4. **`OrderLedger`**: append-only per-batch order storage (max 5 orders)
//! 5. **`aggregate_batch`**: homomorphic fold to encrypted totals
//! 6. **`DecryptionCoordinator`**: pending-request table with replay and
//!    integrity protection for the asynchronous decryption callback
//!
//! ## Settlement Flow
//!
//! ```text
//! open_batch → submit_order* → [close_batch] → request_summary
//!            → (async) on_decryption_callback → SummaryReport
//! ```
//!
//! Individual order values exist only as opaque ciphertext handles; the
//! validated callback for the aggregate is the sole path to plaintext.

pub mod access;
pub mod aggregator;
pub mod batch_manager;
pub mod coordinator;
pub mod engine;
pub mod ledger;
pub mod rate_limit;

pub use access::AccessControl;
pub use aggregator::{BatchAggregate, aggregate_batch};
pub use batch_manager::BatchManager;
pub use coordinator::DecryptionCoordinator;
pub use engine::SettlementEngine;
pub use ledger::OrderLedger;
pub use rate_limit::RateLimiter;
