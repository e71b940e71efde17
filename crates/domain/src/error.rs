//! Unified error type for the domain layer
//!
//! Every failure the health rules can produce is a value of this enum,
//! so callers (use cases, HTTP handlers) can react without downcasting
//! and a single malformed record never takes the service down.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g. negative amounts, invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Character data is missing or unusable (e.g. no class levels)
    #[error("Malformed character data: {0}")]
    MalformedCharacter(String),

    /// Operation invoked before the state it requires exists
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Parse error (for value objects and closed enums)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for rejected inputs.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a malformed-character error for records the rules cannot
    /// derive anything from (missing or degenerate class data).
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedCharacter(msg.into())
    }

    /// Creates a precondition error for operations that require state
    /// (health pool, defenses) which has not been initialized.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Used by `FromStr` implementations when the input doesn't match
    /// any known variant:
    ///
    /// ```ignore
    /// "frost".parse::<DamageType>()
    ///     .map_err(|_| DomainError::parse("Unknown damage type: frost"));
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
