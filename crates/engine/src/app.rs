//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::CharacterRepo;
use crate::use_cases::HealthUseCases;

/// Main application state.
///
/// Holds the use cases, wired to whatever character store `main`
/// constructed. Passed to HTTP handlers via Axum state.
pub struct App {
    pub health: HealthUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self {
            health: HealthUseCases::new(characters),
        }
    }
}
