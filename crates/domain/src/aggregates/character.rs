//! Character aggregate - the record the health rules operate on
//!
//! Pure data with a narrow mutation surface: the only state the rules
//! ever change is the lazily derived health pool. Everything else is
//! fixed at load time.

use crate::value_objects::{
    Ability, AbilityScores, CharacterName, ClassLevel, Defenses, HealthPool, Item,
};

/// A stored character sheet.
///
/// # Invariants
///
/// - `name` is non-empty and <= 200 characters (enforced by `CharacterName`)
/// - `health`, once present, is never recomputed or removed by the domain;
///   clearing it is a storage-layer concern
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    name: CharacterName,
    /// Ordered: the first contributing entry is the primary class
    class_levels: Vec<ClassLevel>,
    ability_scores: AbilityScores,
    items: Vec<Item>,
    /// Absent on records that never listed defenses; damage application
    /// requires it
    defenses: Option<Defenses>,
    /// Lazily derived hit-point pool
    health: Option<HealthPool>,
}

impl Character {
    /// Create a character with no classes, items, or defenses.
    pub fn new(name: CharacterName) -> Self {
        Self {
            name,
            class_levels: Vec::new(),
            ability_scores: AbilityScores::default(),
            items: Vec::new(),
            defenses: None,
            health: None,
        }
    }

    /// Reconstruct a character from storage.
    pub fn from_parts(
        name: CharacterName,
        class_levels: Vec<ClassLevel>,
        ability_scores: AbilityScores,
        items: Vec<Item>,
        defenses: Option<Defenses>,
        health: Option<HealthPool>,
    ) -> Self {
        Self {
            name,
            class_levels,
            ability_scores,
            items,
            defenses,
            health,
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // Builder-style methods
    // ──────────────────────────────────────────────────────────────────

    pub fn with_class(mut self, class_level: ClassLevel) -> Self {
        self.class_levels.push(class_level);
        self
    }

    pub fn with_ability_scores(mut self, scores: AbilityScores) -> Self {
        self.ability_scores = scores;
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_defenses(mut self, defenses: Defenses) -> Self {
        self.defenses = Some(defenses);
        self
    }

    // ──────────────────────────────────────────────────────────────────
    // Read accessors
    // ──────────────────────────────────────────────────────────────────

    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    pub fn class_levels(&self) -> &[ClassLevel] {
        &self.class_levels
    }

    pub fn ability_scores(&self) -> &AbilityScores {
        &self.ability_scores
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn defenses(&self) -> Option<&Defenses> {
        self.defenses.as_ref()
    }

    pub fn health(&self) -> Option<&HealthPool> {
        self.health.as_ref()
    }

    /// Base score plus every applicable item bonus for one ability.
    pub fn effective_score(&self, ability: Ability) -> i32 {
        let base = self.ability_scores.get(ability);
        self.items
            .iter()
            .fold(base, |score, item| score + item.bonus_for(ability))
    }

    // ──────────────────────────────────────────────────────────────────
    // Mutation surface used by the health rules
    // ──────────────────────────────────────────────────────────────────

    /// Install the derived pool. The rules call this exactly once per
    /// character lifetime; storage hydration goes through `from_parts`.
    pub fn set_health(&mut self, pool: HealthPool) {
        self.health = Some(pool);
    }

    pub fn health_mut(&mut self) -> Option<&mut HealthPool> {
        self.health.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{Defense, DefenseKind, DamageType};

    fn name(s: &str) -> CharacterName {
        CharacterName::new(s).expect("valid name")
    }

    #[test]
    fn new_character_has_no_health() {
        let character = Character::new(name("Briv"));
        assert!(character.health().is_none());
        assert!(character.defenses().is_none());
        assert!(character.class_levels().is_empty());
    }

    #[test]
    fn builders_accumulate() {
        let character = Character::new(name("Briv"))
            .with_class(ClassLevel::new(12, 3))
            .with_class(ClassLevel::new(8, 1))
            .with_defenses(
                [Defense::new(DamageType::Fire, DefenseKind::Immunity)]
                    .into_iter()
                    .collect(),
            );
        assert_eq!(character.class_levels().len(), 2);
        assert!(character
            .defenses()
            .expect("defenses set")
            .is_immune(DamageType::Fire));
    }

    #[test]
    fn effective_score_includes_item_bonuses() {
        let character = Character::new(name("Briv"))
            .with_ability_scores(AbilityScores {
                constitution: 14,
                ..Default::default()
            })
            .with_item(Item::new("Belt of Dwarvenkind").with_modifier(
                "stats",
                "constitution",
                2,
            ))
            .with_item(Item::new("Torch"));
        assert_eq!(character.effective_score(Ability::Constitution), 16);
        assert_eq!(character.effective_score(Ability::Strength), 0);
    }

    #[test]
    fn set_health_installs_pool() {
        let mut character = Character::new(name("Briv"));
        character.set_health(HealthPool::new(20));
        assert_eq!(character.health().expect("pool set").max_hp(), 20);
    }
}
