//! Game-rule engines operating on the character aggregate

pub mod health;

pub use health::{DamageOutcome, HealthRules, TempHpGrant};
