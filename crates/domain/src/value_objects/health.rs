//! The hit-point pool derived for a character
//!
//! Invariants the mutators preserve:
//! - `temp_hp >= 0` at all times
//! - `max_hp >= 0` and fixed after construction
//! - `hitpoints <= max_hp` is restored by healing only; damage has no
//!   floor, so `hitpoints` may go arbitrarily negative

use serde::Serialize;

/// A character's current hit-point state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPool {
    hitpoints: i32,
    max_hp: i32,
    temp_hp: i32,
}

impl HealthPool {
    /// Create a freshly derived pool: full hitpoints, no temporary HP.
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            hitpoints: max_hp,
            max_hp,
            temp_hp: 0,
        }
    }

    /// Reconstruct from storage. Clamps `max_hp` and `temp_hp` back into
    /// range so a hand-edited record cannot smuggle in a negative buffer.
    pub fn from_parts(hitpoints: i32, max_hp: i32, temp_hp: i32) -> Self {
        Self {
            hitpoints,
            max_hp: max_hp.max(0),
            temp_hp: temp_hp.max(0),
        }
    }

    /// Current hitpoints. May be negative after heavy damage.
    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    /// Maximum hitpoints, fixed at derivation time.
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Current temporary hitpoints.
    pub fn temp_hp(&self) -> i32 {
        self.temp_hp
    }

    /// Apply already-mitigated damage: temporary HP soaks first, the
    /// remainder comes off `hitpoints` with no floor.
    ///
    /// `amount` must be non-negative; callers (the health rules) validate
    /// before reaching the pool.
    pub(crate) fn absorb(&mut self, amount: i32) {
        let soaked = self.temp_hp.min(amount);
        self.temp_hp -= soaked;
        self.hitpoints = self.hitpoints.saturating_sub(amount - soaked);
    }

    /// Add hitpoints, never past the maximum. Temporary HP is untouched.
    pub(crate) fn heal(&mut self, amount: i32) {
        self.hitpoints = self.hitpoints.saturating_add(amount).min(self.max_hp);
    }

    /// Replace the temporary HP buffer when the grant is strictly larger.
    /// Returns whether the grant took effect.
    pub(crate) fn grant_temp(&mut self, amount: i32) -> bool {
        if amount > self.temp_hp {
            self.temp_hp = amount;
            true
        } else {
            false
        }
    }
}
