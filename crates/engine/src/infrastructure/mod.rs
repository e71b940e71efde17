//! Infrastructure: ports and their concrete implementations

pub mod persistence;
pub mod ports;
