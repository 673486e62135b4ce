//! System-wide constants for the OpenSettle settlement engine.

/// Maximum orders allowed in a single batch.
pub const MAX_ORDERS_PER_BATCH: usize = 5;

/// Default per-actor cooldown between privileged actions, in seconds.
pub const DEFAULT_COOLDOWN_SECS: u64 = 60;

/// Number of cleartext values a summary decryption returns:
/// `[total_volume, total_value]`.
pub const SUMMARY_CLEARTEXT_COUNT: usize = 2;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenSettle";
