//! Items carried by a character, with optional stat modifiers

use crate::value_objects::Ability;

/// A modifier an item applies while held.
///
/// Only modifiers targeting the stats object apply to ability scores;
/// other `affected_object` values are carried but ignored by the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemModifier {
    /// What the modifier targets (`"stats"` for ability scores)
    pub affected_object: String,
    /// Which ability the modifier raises or lowers
    pub affected_ability: String,
    /// The value added to the base score
    pub value: i32,
}

/// An item in a character's possession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub modifier: Option<ItemModifier>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifier: None,
        }
    }

    /// Attach a stat modifier to the item.
    pub fn with_modifier(
        mut self,
        affected_object: impl Into<String>,
        affected_ability: impl Into<String>,
        value: i32,
    ) -> Self {
        self.modifier = Some(ItemModifier {
            affected_object: affected_object.into(),
            affected_ability: affected_ability.into(),
            value,
        });
        self
    }

    /// The bonus this item grants to the given ability, or 0.
    pub fn bonus_for(&self, ability: Ability) -> i32 {
        match &self.modifier {
            Some(modifier)
                if modifier.affected_object.eq_ignore_ascii_case("stats")
                    && modifier
                        .affected_ability
                        .eq_ignore_ascii_case(ability.as_str()) =>
            {
                modifier.value
            }
            _ => 0,
        }
    }
}
