//! Port traits for infrastructure boundaries.
//!
//! The only abstraction in the engine: character storage. Everything
//! else is concrete types. The port exists so the JSON-file store can be
//! swapped for a database without touching the use cases, and so use
//! cases can be tested against a mock.

use async_trait::async_trait;

use charvault_domain::Character;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Character storage, keyed by the name-derived slug.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    /// Load a character by id. `Ok(None)` when no record exists.
    async fn get(&self, id: &str) -> Result<Option<Character>, RepoError>;

    /// Persist the character under its name slug.
    async fn save(&self, character: &Character) -> Result<(), RepoError>;

    /// Parse a raw record without touching storage.
    fn parse(&self, raw: &str) -> Result<Character, RepoError>;
}
