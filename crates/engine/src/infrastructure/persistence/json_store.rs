//! JSON-file character repository.
//!
//! Live records live under the data directory as `<slug>.json`. A read
//! that misses falls back to the seed directory of starter characters;
//! a seed hit is promoted into the data directory so later writes land
//! on the live copy.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use charvault_domain::Character;

use super::record::CharacterRecord;
use crate::infrastructure::ports::{CharacterRepo, RepoError};

pub struct JsonFileCharacterRepo {
    data_dir: PathBuf,
    seed_dir: PathBuf,
}

impl JsonFileCharacterRepo {
    pub fn new(data_dir: impl Into<PathBuf>, seed_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            seed_dir: seed_dir.into(),
        }
    }

    fn live_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{id}.json"))
    }

    fn seed_path(&self, id: &str) -> PathBuf {
        self.seed_dir.join(format!("{id}.json"))
    }

    fn decode(raw: &str) -> Result<Character, RepoError> {
        let record: CharacterRecord =
            serde_json::from_str(raw).map_err(|e| RepoError::Serialization(e.to_string()))?;
        record
            .into_domain()
            .map_err(|e| RepoError::Serialization(e.to_string()))
    }

    fn encode(character: &Character) -> Result<String, RepoError> {
        serde_json::to_string_pretty(&CharacterRecord::from(character))
            .map_err(|e| RepoError::Serialization(e.to_string()))
    }

    async fn read_record(path: &Path) -> Result<Option<String>, RepoError> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepoError::Io(e.to_string())),
        }
    }
}

#[async_trait]
impl CharacterRepo for JsonFileCharacterRepo {
    async fn get(&self, id: &str) -> Result<Option<Character>, RepoError> {
        if let Some(raw) = Self::read_record(&self.live_path(id)).await? {
            return Self::decode(&raw).map(Some);
        }

        match Self::read_record(&self.seed_path(id)).await? {
            Some(raw) => {
                let character = Self::decode(&raw)?;
                tracing::info!(id, "Loaded seed character, promoting to data directory");
                self.save(&character).await?;
                Ok(Some(character))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| RepoError::Io(e.to_string()))?;
        let path = self.live_path(&character.name().slug());
        tokio::fs::write(&path, Self::encode(character)?)
            .await
            .map_err(|e| RepoError::Io(e.to_string()))
    }

    fn parse(&self, raw: &str) -> Result<Character, RepoError> {
        Self::decode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_RECORD: &str = r#"{
        "name": "Briv Steelhide",
        "classes": [{ "hitdicevalue": 12, "classlevel": 3 }],
        "stats": { "constitution": 14 },
        "defenses": [{ "type": "fire", "defense": "immunity" }]
    }"#;

    fn store(root: &Path) -> JsonFileCharacterRepo {
        JsonFileCharacterRepo::new(root.join("data"), root.join("seed"))
    }

    #[tokio::test]
    async fn missing_character_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = store(dir.path());
        assert!(repo.get("nobody").await.expect("reads").is_none());
    }

    #[tokio::test]
    async fn seed_records_are_promoted_on_first_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("seed")).expect("mkdir");
        std::fs::write(dir.path().join("seed/briv_steelhide.json"), SEED_RECORD)
            .expect("write seed");

        let repo = store(dir.path());
        let character = repo
            .get("briv_steelhide")
            .await
            .expect("reads")
            .expect("found");
        assert_eq!(character.name().as_str(), "Briv Steelhide");

        // The live copy now exists and wins on the next read
        assert!(dir.path().join("data/briv_steelhide.json").exists());
        assert!(repo
            .get("briv_steelhide")
            .await
            .expect("reads")
            .is_some());
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = store(dir.path());
        let character = repo.parse(SEED_RECORD).expect("parses");

        repo.save(&character).await.expect("saves");
        let loaded = repo
            .get("briv_steelhide")
            .await
            .expect("reads")
            .expect("found");
        assert_eq!(loaded, character);
    }

    #[tokio::test]
    async fn malformed_record_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("data")).expect("mkdir");
        std::fs::write(dir.path().join("data/broken.json"), "{ not json").expect("write");

        let repo = store(dir.path());
        let err = repo.get("broken").await.expect_err("rejected");
        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[tokio::test]
    async fn record_without_name_is_a_serialization_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("data")).expect("mkdir");
        std::fs::write(dir.path().join("data/anon.json"), "{}").expect("write");

        let repo = store(dir.path());
        assert!(matches!(
            repo.get("anon").await.expect_err("rejected"),
            RepoError::Serialization(_)
        ));
    }
}
