//! Per-actor action cooldowns.
//!
//! The limiter keeps the last-action timestamp per `(actor, action kind)`
//! and rejects an action attempted before `last + cooldown`. Checking and
//! recording are split: the engine checks early in its validation sequence
//! and records only on the success path of the guarded action, so a
//! rejected call never burns the actor's cooldown.

use std::collections::HashMap;

use opensettle_types::{ActionKind, ActorId, OpensettleError, Result};

/// Cooldown table keyed by `(actor, action kind)`, in unix seconds.
pub struct RateLimiter {
    last_action: HashMap<(ActorId, ActionKind), u64>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_action: HashMap::new(),
        }
    }

    /// Check that the cooldown for `(actor, action)` has elapsed at `now`.
    ///
    /// # Errors
    /// Returns [`OpensettleError::CooldownActive`] with the remaining wait.
    pub fn check(
        &self,
        actor: ActorId,
        action: ActionKind,
        now: u64,
        cooldown_secs: u64,
    ) -> Result<()> {
        if let Some(&last) = self.last_action.get(&(actor, action)) {
            let ready_at = last.saturating_add(cooldown_secs);
            if now < ready_at {
                return Err(OpensettleError::CooldownActive {
                    action,
                    remaining_secs: ready_at - now,
                });
            }
        }
        Ok(())
    }

    /// Record `now` as the last-action time for `(actor, action)`.
    pub fn record(&mut self, actor: ActorId, action: ActionKind, now: u64) {
        self.last_action.insert((actor, action), now);
    }

    /// [`check`](Self::check) then [`record`](Self::record) in one step, for
    /// actions whose remaining steps cannot fail.
    pub fn check_and_record(
        &mut self,
        actor: ActorId,
        action: ActionKind,
        now: u64,
        cooldown_secs: u64,
    ) -> Result<()> {
        self.check(actor, action, now, cooldown_secs)?;
        self.record(actor, action, now);
        Ok(())
    }

    /// Last recorded action time for `(actor, action)`, if any.
    #[must_use]
    pub fn last(&self, actor: ActorId, action: ActionKind) -> Option<u64> {
        self.last_action.get(&(actor, action)).copied()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
