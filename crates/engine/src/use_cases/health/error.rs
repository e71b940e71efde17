//! Health operation errors.

use charvault_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during health operations.
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Character not found: {0}")]
    CharacterNotFound(String),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
