//! Infrastructure implementations.
//!
//! Contains port trait implementations for storage, time, and randomness.

pub mod clock;
pub mod config;
pub mod memory_store;
pub mod ports;
pub mod sqlite_store;
