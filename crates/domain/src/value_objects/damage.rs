//! Damage type enumeration
//!
//! Closed set: anything outside it is rejected at the routing layer and
//! again by the rules, so unknown types never silently deal full damage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The damage types a defense entry or damage request can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Poison,
    Acid,
    Fire,
    Cold,
    Radiant,
    Necrotic,
    Lightning,
    Thunder,
    Force,
    Psychic,
}

impl DamageType {
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Slashing,
            DamageType::Piercing,
            DamageType::Bludgeoning,
            DamageType::Poison,
            DamageType::Acid,
            DamageType::Fire,
            DamageType::Cold,
            DamageType::Radiant,
            DamageType::Necrotic,
            DamageType::Lightning,
            DamageType::Thunder,
            DamageType::Force,
            DamageType::Psychic,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Slashing => "slashing",
            DamageType::Piercing => "piercing",
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Poison => "poison",
            DamageType::Acid => "acid",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Radiant => "radiant",
            DamageType::Necrotic => "necrotic",
            DamageType::Lightning => "lightning",
            DamageType::Thunder => "thunder",
            DamageType::Force => "force",
            DamageType::Psychic => "psychic",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DamageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slashing" => Ok(DamageType::Slashing),
            "piercing" => Ok(DamageType::Piercing),
            "bludgeoning" => Ok(DamageType::Bludgeoning),
            "poison" => Ok(DamageType::Poison),
            "acid" => Ok(DamageType::Acid),
            "fire" => Ok(DamageType::Fire),
            "cold" => Ok(DamageType::Cold),
            "radiant" => Ok(DamageType::Radiant),
            "necrotic" => Ok(DamageType::Necrotic),
            "lightning" => Ok(DamageType::Lightning),
            "thunder" => Ok(DamageType::Thunder),
            "force" => Ok(DamageType::Force),
            "psychic" => Ok(DamageType::Psychic),
            _ => Err(DomainError::parse(format!("Unknown damage type: {}", s))),
        }
    }
}
