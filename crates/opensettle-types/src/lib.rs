//! # opensettle-types
//!
//! Shared types, errors, and configuration for the **OpenSettle**
//! confidential batch settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ActorId`], [`BatchId`], [`RequestId`]
//! - **Ciphertext model**: [`CiphertextHandle`]
//! - **Batch model**: [`Batch`], [`BatchState`], [`Order`]
//! - **Decryption model**: [`DecryptionContext`], [`SummaryReport`]
//! - **Audit model**: [`AuditRecord`], [`AuditEvent`]
//! - **Rate limiting**: [`ActionKind`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`OpensettleError`] with `OS_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults
//!
//! Order values (quantity, price) only ever appear here as opaque
//! [`CiphertextHandle`]s. Plaintext shows up in exactly one place: the
//! aggregate totals of a [`SummaryReport`] after a verified decryption
//! callback.

pub mod action;
pub mod audit;
pub mod batch;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod handle;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use opensettle_types::{ActorId, Batch, CiphertextHandle, ...};

pub use action::*;
pub use audit::*;
pub use batch::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use handle::*;
pub use ids::*;

// Constants are accessed via `opensettle_types::constants::FOO`
// (not re-exported to avoid name collisions).
