//! Aggregate roots

pub mod character;

pub use character::Character;
