//! Ability enumeration and per-character ability scores

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The six abilities a character sheet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn all() -> &'static [Ability] {
        &[
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strength" => Ok(Ability::Strength),
            "dexterity" => Ok(Ability::Dexterity),
            "constitution" => Ok(Ability::Constitution),
            "intelligence" => Ok(Ability::Intelligence),
            "wisdom" => Ok(Ability::Wisdom),
            "charisma" => Ok(Ability::Charisma),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

/// Raw ability scores for one character.
///
/// A score the record never supplied reads as 0, which is what the
/// original data format degraded to for missing stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    /// Look up the base score for one ability.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "Constitution".parse::<Ability>().expect("parses"),
            Ability::Constitution
        );
        assert_eq!(
            "WISDOM".parse::<Ability>().expect("parses"),
            Ability::Wisdom
        );
    }

    #[test]
    fn parse_rejects_unknown_ability() {
        assert!("luck".parse::<Ability>().is_err());
    }

    #[test]
    fn missing_scores_default_to_zero() {
        let scores = AbilityScores::default();
        assert_eq!(scores.get(Ability::Constitution), 0);
    }

    #[test]
    fn get_reads_the_matching_field() {
        let scores = AbilityScores {
            constitution: 14,
            ..Default::default()
        };
        assert_eq!(scores.get(Ability::Constitution), 14);
        assert_eq!(scores.get(Ability::Strength), 0);
    }
}
