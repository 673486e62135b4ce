//! Batch lifecycle control.
//!
//! At most one batch is open at any time. Ids are allocated sequentially
//! starting at 1 and never reused; closing a batch returns the manager to
//! `NoneOpen` without touching the batch's stored orders.

use opensettle_types::{BatchId, OpensettleError, Result};

/// `NoneOpen` / `Open(id)` state machine with monotonic id allocation.
pub struct BatchManager {
    /// The currently open batch, if any.
    open: Option<BatchId>,
    /// Next id to allocate.
    next_id: u64,
}

impl BatchManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: None,
            next_id: 1,
        }
    }

    /// Open a new batch.
    ///
    /// # Errors
    /// Returns [`OpensettleError::BatchAlreadyOpen`] if a batch is open.
    pub fn open_batch(&mut self) -> Result<BatchId> {
        if let Some(id) = self.open {
            return Err(OpensettleError::BatchAlreadyOpen(id));
        }
        let id = BatchId(self.next_id);
        self.next_id += 1;
        self.open = Some(id);
        Ok(id)
    }

    /// Close the open batch, returning its id.
    ///
    /// # Errors
    /// Returns [`OpensettleError::NoOpenBatch`] if none is open.
    pub fn close_batch(&mut self) -> Result<BatchId> {
        let id = self.open.take().ok_or(OpensettleError::NoOpenBatch)?;
        Ok(id)
    }

    /// The open batch id, if any.
    #[must_use]
    pub fn open_id(&self) -> Option<BatchId> {
        self.open
    }

    /// Require an open batch.
    ///
    /// # Errors
    /// Returns [`OpensettleError::NoOpenBatch`] if none is open.
    pub fn require_open(&self) -> Result<BatchId> {
        self.open.ok_or(OpensettleError::NoOpenBatch)
    }
}

impl Default for BatchManager {
    fn default() -> Self {
        Self::new()
    }
}
