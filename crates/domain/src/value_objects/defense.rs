//! Defenses: resistances and immunities by damage type
//!
//! Modeled as a set keyed by `(damage_type, kind)` so duplicate entries
//! collapse and immunity dominance is a plain membership test instead of
//! an array scan.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::DamageType;

/// How strongly a character shrugs off a damage type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DefenseKind {
    /// Halves (floor) incoming damage of the type
    Resistance,
    /// Negates incoming damage of the type entirely
    Immunity,
}

impl DefenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefenseKind::Resistance => "resistance",
            DefenseKind::Immunity => "immunity",
        }
    }
}

impl fmt::Display for DefenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DefenseKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "resistance" => Ok(DefenseKind::Resistance),
            "immunity" => Ok(DefenseKind::Immunity),
            _ => Err(DomainError::parse(format!("Unknown defense kind: {}", s))),
        }
    }
}

/// One defense entry: a damage type paired with how it is mitigated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Defense {
    #[serde(rename = "damageType", alias = "type")]
    pub damage_type: DamageType,
    #[serde(rename = "kind", alias = "defense")]
    pub kind: DefenseKind,
}

impl Defense {
    pub fn new(damage_type: DamageType, kind: DefenseKind) -> Self {
        Self { damage_type, kind }
    }
}

/// A character's full defense set.
///
/// Ordered so serialized output is deterministic regardless of how the
/// entries arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Defenses(BTreeSet<Defense>);

impl Defenses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Duplicates collapse silently.
    pub fn insert(&mut self, defense: Defense) {
        self.0.insert(defense);
    }

    /// Whether the character takes zero damage of the type.
    pub fn is_immune(&self, damage_type: DamageType) -> bool {
        self.0
            .contains(&Defense::new(damage_type, DefenseKind::Immunity))
    }

    /// Whether incoming damage of the type is halved. Immunity is checked
    /// first by the rules, so this never overrides it.
    pub fn is_resistant(&self, damage_type: DamageType) -> bool {
        self.0
            .contains(&Defense::new(damage_type, DefenseKind::Resistance))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Defense> {
        self.0.iter()
    }
}

impl FromIterator<Defense> for Defenses {
    fn from_iter<I: IntoIterator<Item = Defense>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
