//! Health use cases.
//!
//! Orchestrates the read-modify-write cycle around the domain's health
//! rules: load the character, derive the pool if it is missing, apply
//! the operation, persist, narrate. Writes to the same character are
//! serialized with a per-character lock so concurrent requests cannot
//! lose updates.

mod error;

pub use error::HealthError;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use charvault_domain::{Character, DamageType, DefenseKind, HealthPool, HealthRules};

use crate::infrastructure::ports::CharacterRepo;

pub struct HealthUseCases {
    characters: Arc<dyn CharacterRepo>,
    rules: HealthRules,
    write_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl HealthUseCases {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self {
            characters,
            rules: HealthRules::new(),
            write_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        self.write_locks.entry(id.to_owned()).or_default().clone()
    }

    async fn load(&self, id: &str) -> Result<Character, HealthError> {
        self.characters
            .get(id)
            .await?
            .ok_or_else(|| HealthError::CharacterNotFound(id.to_owned()))
    }

    /// Fetch the full character record.
    pub async fn character(&self, id: &str) -> Result<Character, HealthError> {
        self.load(id).await
    }

    /// Fetch the character's health pool, deriving and persisting it on
    /// first access. An existing pool is returned without recomputation.
    pub async fn health(&self, id: &str) -> Result<HealthPool, HealthError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut character = self.load(id).await?;
        if let Some(pool) = character.health() {
            return Ok(*pool);
        }

        let pool = self.rules.derive_or_get(&mut character)?;
        self.characters.save(&character).await?;
        tracing::info!(
            character = %character.name(),
            max_hp = pool.max_hp(),
            "Derived health pool"
        );
        Ok(pool)
    }

    /// Apply typed damage and persist the result.
    pub async fn damage(
        &self,
        id: &str,
        damage_type: DamageType,
        amount: i32,
    ) -> Result<HealthPool, HealthError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut character = self.load(id).await?;
        if character.health().is_none() {
            self.rules.derive_or_get(&mut character)?;
        }

        let outcome = self.rules.apply_damage(&mut character, damage_type, amount)?;
        self.characters.save(&character).await?;

        match outcome.mitigation {
            Some(DefenseKind::Immunity) => tracing::info!(
                character = %character.name(),
                %damage_type,
                raw = outcome.raw,
                "Damage negated by immunity"
            ),
            Some(DefenseKind::Resistance) => tracing::info!(
                character = %character.name(),
                %damage_type,
                raw = outcome.raw,
                effective = outcome.effective,
                "Damage halved by resistance"
            ),
            None => tracing::info!(
                character = %character.name(),
                %damage_type,
                amount = outcome.raw,
                hitpoints = outcome.pool.hitpoints(),
                "Damage applied"
            ),
        }
        Ok(outcome.pool)
    }

    /// Heal the character and persist the result.
    pub async fn heal(&self, id: &str, amount: i32) -> Result<HealthPool, HealthError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut character = self.load(id).await?;
        if character.health().is_none() {
            self.rules.derive_or_get(&mut character)?;
        }

        let pool = self.rules.apply_healing(&mut character, amount)?;
        self.characters.save(&character).await?;
        tracing::info!(
            character = %character.name(),
            amount,
            hitpoints = pool.hitpoints(),
            "Healing applied"
        );
        Ok(pool)
    }

    /// Grant temporary hit points and persist the result.
    pub async fn grant_temp_hp(&self, id: &str, amount: i32) -> Result<HealthPool, HealthError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut character = self.load(id).await?;
        if character.health().is_none() {
            self.rules.derive_or_get(&mut character)?;
        }

        let grant = self.rules.grant_temporary_hp(&mut character, amount)?;
        self.characters.save(&character).await?;
        if grant.replaced {
            tracing::info!(
                character = %character.name(),
                temp_hp = grant.pool.temp_hp(),
                "Temporary HP granted"
            );
        } else {
            tracing::info!(
                character = %character.name(),
                offered = amount,
                temp_hp = grant.pool.temp_hp(),
                "Temporary HP grant discarded, current buffer is larger"
            );
        }
        Ok(grant.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};
    use charvault_domain::{AbilityScores, CharacterName, ClassLevel, Defense, DomainError};

    fn briv() -> Character {
        Character::new(CharacterName::new("Briv Steelhide").expect("valid"))
            .with_class(ClassLevel::new(12, 3))
            .with_class(ClassLevel::new(8, 1))
            .with_class(ClassLevel::new(6, 1))
            .with_ability_scores(AbilityScores {
                constitution: 14,
                ..Default::default()
            })
            .with_defenses(
                [
                    Defense::new(DamageType::Slashing, DefenseKind::Resistance),
                    Defense::new(DamageType::Fire, DefenseKind::Immunity),
                ]
                .into_iter()
                .collect(),
            )
    }

    fn repo_with(character: Character) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        repo
    }

    #[tokio::test]
    async fn health_derives_and_persists_on_first_access() {
        let mut repo = repo_with(briv());
        repo.expect_save()
            .times(1)
            .withf(|saved| saved.health().map(HealthPool::max_hp) == Some(45))
            .returning(|_| Ok(()));

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let pool = use_cases.health("briv_steelhide").await.expect("derives");
        assert_eq!((pool.hitpoints(), pool.max_hp(), pool.temp_hp()), (45, 45, 0));
    }

    #[tokio::test]
    async fn health_returns_existing_pool_without_saving() {
        let mut stored = briv();
        let rules = HealthRules::new();
        rules.derive_or_get(&mut stored).expect("derives");
        rules
            .apply_damage(&mut stored, DamageType::Acid, 7)
            .expect("damages");

        let mut repo = repo_with(stored);
        repo.expect_save().times(0);

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let pool = use_cases.health("briv_steelhide").await.expect("reads");
        assert_eq!(pool.hitpoints(), 38);
    }

    #[tokio::test]
    async fn unknown_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let err = use_cases.health("nobody").await.expect_err("missing");
        assert!(matches!(err, HealthError::CharacterNotFound(_)));
    }

    #[tokio::test]
    async fn damage_derives_lazily_then_applies() {
        let mut repo = repo_with(briv());
        repo.expect_save()
            .times(1)
            .withf(|saved| {
                saved
                    .health()
                    .is_some_and(|pool| pool.hitpoints() == 40 && pool.max_hp() == 45)
            })
            .returning(|_| Ok(()));

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let pool = use_cases
            .damage("briv_steelhide", DamageType::Acid, 5)
            .await
            .expect("applies");
        assert_eq!(pool.hitpoints(), 40);
    }

    #[tokio::test]
    async fn immune_damage_still_persists_the_untouched_pool() {
        let mut repo = repo_with(briv());
        repo.expect_save()
            .times(1)
            .withf(|saved| saved.health().map(HealthPool::hitpoints) == Some(45))
            .returning(|_| Ok(()));

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let pool = use_cases
            .damage("briv_steelhide", DamageType::Fire, 50)
            .await
            .expect("applies");
        assert_eq!(pool.hitpoints(), 45);
    }

    #[tokio::test]
    async fn damage_without_defenses_is_a_domain_error_and_no_save() {
        let stored = Character::new(CharacterName::new("Naked").expect("valid"))
            .with_class(ClassLevel::new(8, 1));
        let mut repo = repo_with(stored);
        repo.expect_save().times(0);

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let err = use_cases
            .damage("naked", DamageType::Acid, 5)
            .await
            .expect_err("rejected");
        assert!(matches!(
            err,
            HealthError::Domain(DomainError::Precondition(_))
        ));
    }

    #[tokio::test]
    async fn heal_caps_at_max_and_persists() {
        let mut stored = briv();
        let rules = HealthRules::new();
        rules.derive_or_get(&mut stored).expect("derives");
        rules
            .apply_damage(&mut stored, DamageType::Acid, 10)
            .expect("damages");

        let mut repo = repo_with(stored);
        repo.expect_save().times(1).returning(|_| Ok(()));

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let pool = use_cases
            .heal("briv_steelhide", 100)
            .await
            .expect("heals");
        assert_eq!(pool.hitpoints(), 45);
    }

    #[tokio::test]
    async fn temp_hp_follows_the_replacement_rule() {
        let mut stored = briv();
        let rules = HealthRules::new();
        rules.derive_or_get(&mut stored).expect("derives");
        rules
            .grant_temporary_hp(&mut stored, 10)
            .expect("grants");

        let mut repo = repo_with(stored);
        repo.expect_save().times(1).returning(|_| Ok(()));

        let use_cases = HealthUseCases::new(Arc::new(repo));
        let pool = use_cases
            .grant_temp_hp("briv_steelhide", 5)
            .await
            .expect("grants");
        assert_eq!(pool.temp_hp(), 10);
    }

    #[tokio::test]
    async fn repo_failures_surface_as_repo_errors() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(|_| Err(RepoError::Io("disk on fire".into())));

        let use_cases = HealthUseCases::new(Arc::new(repo));
        assert!(matches!(
            use_cases.health("briv_steelhide").await.expect_err("fails"),
            HealthError::Repo(_)
        ));
    }
}
