//! On-disk character record schema.
//!
//! Explicit serde mapping for the stored JSON: canonical camelCase keys,
//! with aliases for the lowercase and capitalized spellings older records
//! use. Case tolerance lives here and nowhere else; the domain only ever
//! sees validated values.

use serde::{Deserialize, Serialize};

use charvault_domain::{
    AbilityScores, Character, CharacterName, ClassLevel, Defense, Defenses, DomainError,
    HealthPool, Item,
};

/// A stored character, exactly as serialized to disk and returned by the
/// full-character API route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "classes", alias = "Classes")]
    pub class_levels: Vec<ClassLevelRecord>,
    #[serde(default, alias = "stats", alias = "Stats")]
    pub ability_scores: AbilityScoresRecord,
    #[serde(default, alias = "Items")]
    pub items: Vec<ItemRecord>,
    #[serde(default, alias = "Defenses", skip_serializing_if = "Option::is_none")]
    pub defenses: Option<Vec<DefenseRecord>>,
    #[serde(default, alias = "Health", skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLevelRecord {
    #[serde(default, alias = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "hitdicevalue", alias = "HitDiceValue")]
    pub hit_die_size: u8,
    #[serde(default, alias = "classlevel", alias = "ClassLevel")]
    pub level: u8,
}

/// Ability scores with every field optional; a score the record never
/// supplied reads as 0.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AbilityScoresRecord {
    #[serde(default, alias = "Strength")]
    pub strength: i32,
    #[serde(default, alias = "Dexterity")]
    pub dexterity: i32,
    #[serde(default, alias = "Constitution")]
    pub constitution: i32,
    #[serde(default, alias = "Intelligence")]
    pub intelligence: i32,
    #[serde(default, alias = "Wisdom")]
    pub wisdom: i32,
    #[serde(default, alias = "Charisma")]
    pub charisma: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Modifier", skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ModifierRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierRecord {
    #[serde(default, alias = "affectedobject", alias = "AffectedObject")]
    pub affected_object: String,
    /// Older records call this `affectedvalue`
    #[serde(
        default,
        alias = "affectedvalue",
        alias = "affectedability",
        alias = "AffectedValue"
    )]
    pub affected_ability: String,
    #[serde(default, alias = "Value")]
    pub value: i32,
}

/// Defense entries are kept as raw strings here; unknown damage types or
/// kinds are dropped at conversion instead of failing the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseRecord {
    #[serde(default, alias = "type", alias = "Type")]
    pub damage_type: String,
    #[serde(default, alias = "defense", alias = "Defense", alias = "Kind")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    #[serde(default, alias = "Hitpoints")]
    pub hitpoints: i32,
    #[serde(default, alias = "maxhp", alias = "Maxhp")]
    pub max_hp: i32,
    #[serde(default, alias = "temphp", alias = "Temphp")]
    pub temp_hp: i32,
}

impl CharacterRecord {
    /// Validate and convert into the domain aggregate.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` when the record has no usable name.
    pub fn into_domain(self) -> Result<Character, DomainError> {
        let name = CharacterName::new(self.name)?;

        let class_levels = self
            .class_levels
            .into_iter()
            .map(|class| {
                let entry = ClassLevel::new(class.hit_die_size, class.level);
                match class.name {
                    Some(class_name) => entry.with_name(class_name),
                    None => entry,
                }
            })
            .collect();

        let ability_scores = AbilityScores {
            strength: self.ability_scores.strength,
            dexterity: self.ability_scores.dexterity,
            constitution: self.ability_scores.constitution,
            intelligence: self.ability_scores.intelligence,
            wisdom: self.ability_scores.wisdom,
            charisma: self.ability_scores.charisma,
        };

        let items = self
            .items
            .into_iter()
            .map(|item| match item.modifier {
                Some(modifier) => Item::new(item.name).with_modifier(
                    modifier.affected_object,
                    modifier.affected_ability,
                    modifier.value,
                ),
                None => Item::new(item.name),
            })
            .collect();

        let defenses = self.defenses.map(|entries| {
            entries
                .into_iter()
                .filter_map(|entry| {
                    match (entry.damage_type.parse(), entry.kind.parse()) {
                        (Ok(damage_type), Ok(kind)) => Some(Defense::new(damage_type, kind)),
                        _ => {
                            tracing::warn!(
                                damage_type = %entry.damage_type,
                                kind = %entry.kind,
                                "Dropping unrecognized defense entry"
                            );
                            None
                        }
                    }
                })
                .collect::<Defenses>()
        });

        let health = self
            .health
            .map(|pool| HealthPool::from_parts(pool.hitpoints, pool.max_hp, pool.temp_hp));

        Ok(Character::from_parts(
            name,
            class_levels,
            ability_scores,
            items,
            defenses,
            health,
        ))
    }
}

impl From<&Character> for CharacterRecord {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name().as_str().to_string(),
            class_levels: character
                .class_levels()
                .iter()
                .map(|class| ClassLevelRecord {
                    name: class.name().map(str::to_string),
                    hit_die_size: class.hit_die_size(),
                    level: class.level(),
                })
                .collect(),
            ability_scores: AbilityScoresRecord {
                strength: character.ability_scores().strength,
                dexterity: character.ability_scores().dexterity,
                constitution: character.ability_scores().constitution,
                intelligence: character.ability_scores().intelligence,
                wisdom: character.ability_scores().wisdom,
                charisma: character.ability_scores().charisma,
            },
            items: character
                .items()
                .iter()
                .map(|item| ItemRecord {
                    name: item.name.clone(),
                    modifier: item.modifier.as_ref().map(|modifier| ModifierRecord {
                        affected_object: modifier.affected_object.clone(),
                        affected_ability: modifier.affected_ability.clone(),
                        value: modifier.value,
                    }),
                })
                .collect(),
            defenses: character.defenses().map(|defenses| {
                defenses
                    .iter()
                    .map(|defense| DefenseRecord {
                        damage_type: defense.damage_type.as_str().to_string(),
                        kind: defense.kind.as_str().to_string(),
                    })
                    .collect()
            }),
            health: character.health().map(|pool| HealthRecord {
                hitpoints: pool.hitpoints(),
                max_hp: pool.max_hp(),
                temp_hp: pool.temp_hp(),
            }),
        }
    }
}
