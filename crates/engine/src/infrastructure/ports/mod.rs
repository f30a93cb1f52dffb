//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Entity persistence (SQLite in production, in-memory for tests)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Entity Store Port
// =============================================================================
pub use repos::{EntityStore, Namespace, Version, VersionedRecord, WritePolicy};

#[cfg(test)]
pub use repos::MockEntityStore;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
