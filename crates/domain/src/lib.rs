//! CharVault domain: the character model and the health-resolution rules.
//!
//! Pure and synchronous. All state lives in the [`Character`] values the
//! caller passes in; persistence and transport belong to the engine crate.

pub mod aggregates;
pub mod error;
pub mod rules;
pub mod value_objects;

pub use aggregates::Character;
pub use error::DomainError;
pub use rules::{DamageOutcome, HealthRules, TempHpGrant};
pub use value_objects::{
    Ability, AbilityScores, CharacterName, ClassLevel, DamageType, Defense, DefenseKind,
    Defenses, HealthPool, Item, ItemModifier,
};
