//! Role-based access control.
//!
//! A single owner identity is fixed at construction — there is no transfer
//! operation. The owner manages a set of provider identities authorized to
//! submit orders and request summaries, and a pause flag that gates the
//! batch, order, and summary operations system-wide.

use std::collections::HashSet;

use opensettle_types::{ActorId, OpensettleError, Result};

/// Owner identity, provider set, and the system-wide pause flag.
pub struct AccessControl {
    /// Fixed at construction. No transfer operation exists.
    owner: ActorId,
    /// Identities authorized to submit orders and request summaries.
    providers: HashSet<ActorId>,
    /// Gates every batch/order/summary operation when set.
    paused: bool,
}

impl AccessControl {
    #[must_use]
    pub fn new(owner: ActorId) -> Self {
        Self {
            owner,
            providers: HashSet::new(),
            paused: false,
        }
    }

    /// Require that `caller` is the owner.
    ///
    /// # Errors
    /// Returns [`OpensettleError::NotOwner`] otherwise.
    pub fn require_owner(&self, caller: ActorId) -> Result<()> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(OpensettleError::NotOwner(caller))
        }
    }

    /// Require that `caller` is a registered provider.
    ///
    /// # Errors
    /// Returns [`OpensettleError::NotProvider`] otherwise.
    pub fn require_provider(&self, caller: ActorId) -> Result<()> {
        if self.providers.contains(&caller) {
            Ok(())
        } else {
            Err(OpensettleError::NotProvider(caller))
        }
    }

    /// Require that the engine is not paused.
    ///
    /// # Errors
    /// Returns [`OpensettleError::EnginePaused`] otherwise.
    pub fn require_active(&self) -> Result<()> {
        if self.paused {
            Err(OpensettleError::EnginePaused)
        } else {
            Ok(())
        }
    }

    /// Add a provider. Idempotent: adding an existing provider is a no-op.
    /// Returns whether the set changed.
    pub fn add_provider(&mut self, provider: ActorId) -> bool {
        self.providers.insert(provider)
    }

    /// Remove a provider. Idempotent: removing a non-provider is a no-op.
    /// Returns whether the set changed.
    pub fn remove_provider(&mut self, provider: ActorId) -> bool {
        self.providers.remove(&provider)
    }

    /// Set the pause flag. Returns whether the flag changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }

    #[must_use]
    pub fn owner(&self) -> ActorId {
        self.owner
    }

    #[must_use]
    pub fn is_provider(&self, actor: ActorId) -> bool {
        self.providers.contains(&actor)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of registered providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}
