//! Use cases: orchestration between the HTTP surface and storage

pub mod health;

pub use health::{HealthError, HealthUseCases};
