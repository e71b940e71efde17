//! Health-resolution rules
//!
//! Turns a character's static attributes into a hit-point pool and
//! mutates that pool under damage, healing, and temporary-HP grants.
//! Stateless: every operation takes the character explicitly and holds
//! nothing between calls.

use crate::aggregates::Character;
use crate::error::DomainError;
use crate::value_objects::{Ability, DamageType, DefenseKind, HealthPool};

/// Result of a damage application, for callers that log and persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// The pool after the damage landed
    pub pool: HealthPool,
    /// The defense that mitigated the hit, if any
    pub mitigation: Option<DefenseKind>,
    /// The amount requested
    pub raw: i32,
    /// The amount actually applied after mitigation
    pub effective: i32,
}

/// Result of a temporary-HP grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempHpGrant {
    /// The pool after the grant
    pub pool: HealthPool,
    /// Whether the grant replaced the previous buffer. A grant that is
    /// not strictly larger than the current buffer is discarded.
    pub replaced: bool,
}

/// The health-resolution rule set.
#[derive(Debug, Default)]
pub struct HealthRules;

impl HealthRules {
    pub fn new() -> Self {
        Self
    }

    /// Ability modifier: `floor((score - 10) / 2)`.
    pub fn ability_modifier(&self, score: i32) -> i32 {
        // Rust's / rounds toward zero; the rules need floor division
        let diff = score - 10;
        if diff >= 0 {
            diff / 2
        } else {
            (diff - 1) / 2
        }
    }

    /// Rounded-up average roll of a die: `ceil((1 + size) / 2)`.
    /// A die smaller than 2 faces counts as 1.
    pub fn average_roll(&self, die_size: u8) -> i32 {
        if die_size < 2 {
            return 1;
        }
        (i32::from(die_size) / 2) + 1
    }

    /// Maximum hit points for a character's class composition.
    ///
    /// The first contributing class is primary: its first level grants
    /// the full hit die plus the constitution modifier. Every other
    /// level, in any class, grants the averaged roll plus the modifier.
    /// Entries that cannot contribute (no levels, die < 2) are skipped.
    ///
    /// # Errors
    ///
    /// `DomainError::MalformedCharacter` when there is no class entry
    /// that can grant hit points. A zero result is never reported as a
    /// usable maximum.
    pub fn max_hp(&self, character: &Character) -> Result<i32, DomainError> {
        if character.class_levels().is_empty() {
            return Err(DomainError::malformed(format!(
                "{} has no class levels to derive hit points from",
                character.name()
            )));
        }

        let con_mod = self.ability_modifier(character.effective_score(Ability::Constitution));

        let mut total = 0i32;
        let mut primary_seen = false;
        for class in character.class_levels() {
            if !class.contributes_hp() {
                continue;
            }
            let mut level = i32::from(class.level());
            if !primary_seen {
                // First level of the first class gets the maximum roll
                total += i32::from(class.hit_die_size()) + con_mod;
                level -= 1;
                primary_seen = true;
            }
            total += (self.average_roll(class.hit_die_size()) + con_mod) * level;
        }

        if !primary_seen {
            return Err(DomainError::malformed(format!(
                "{} has only degenerate class entries",
                character.name()
            )));
        }

        Ok(total)
    }

    /// Return the character's health pool, deriving it on first access.
    ///
    /// Idempotent: an existing pool is returned untouched, never
    /// recomputed. Persisting the character afterward is the caller's
    /// job.
    pub fn derive_or_get(&self, character: &mut Character) -> Result<HealthPool, DomainError> {
        if let Some(pool) = character.health() {
            return Ok(*pool);
        }
        let pool = HealthPool::new(self.max_hp(character)?);
        character.set_health(pool);
        Ok(pool)
    }

    /// Apply typed damage to the character's pool.
    ///
    /// Immunity negates the hit entirely and takes precedence over
    /// resistance; resistance halves it (floor). What remains consumes
    /// temporary HP first and then hitpoints, with no floor.
    ///
    /// # Errors
    ///
    /// - `Precondition` if the character has no health pool or no
    ///   defenses list; nothing is mutated
    /// - `Validation` if `amount` is negative
    pub fn apply_damage(
        &self,
        character: &mut Character,
        damage_type: DamageType,
        amount: i32,
    ) -> Result<DamageOutcome, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation("Damage amount cannot be negative"));
        }
        let (immune, resistant) = match character.defenses() {
            Some(defenses) => (
                defenses.is_immune(damage_type),
                defenses.is_resistant(damage_type),
            ),
            None => {
                return Err(DomainError::precondition(format!(
                    "{} has no defenses list",
                    character.name()
                )))
            }
        };

        // Immunity dominates resistance when both are present
        let (mitigation, effective) = if immune {
            (Some(DefenseKind::Immunity), 0)
        } else if resistant {
            (Some(DefenseKind::Resistance), amount / 2)
        } else {
            (None, amount)
        };

        let name = character.name().clone();
        let pool = character.health_mut().ok_or_else(|| {
            DomainError::precondition(format!("{} has no health pool to damage", name))
        })?;
        pool.absorb(effective);

        Ok(DamageOutcome {
            pool: *pool,
            mitigation,
            raw: amount,
            effective,
        })
    }

    /// Heal the character, never past the maximum. Temporary HP is
    /// unaffected.
    pub fn apply_healing(
        &self,
        character: &mut Character,
        amount: i32,
    ) -> Result<HealthPool, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation("Heal amount cannot be negative"));
        }
        let name = character.name().clone();
        let pool = character.health_mut().ok_or_else(|| {
            DomainError::precondition(format!("{} has no health pool to heal", name))
        })?;
        pool.heal(amount);
        Ok(*pool)
    }

    /// Grant temporary hit points under the replacement rule: only a
    /// grant strictly larger than the current buffer takes effect.
    pub fn grant_temporary_hp(
        &self,
        character: &mut Character,
        amount: i32,
    ) -> Result<TempHpGrant, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation(
                "Temporary HP amount cannot be negative",
            ));
        }
        let name = character.name().clone();
        let pool = character.health_mut().ok_or_else(|| {
            DomainError::precondition(format!("{} has no health pool for temporary HP", name))
        })?;
        let replaced = pool.grant_temp(amount);
        Ok(TempHpGrant {
            pool: *pool,
            replaced,
        })
    }
}
