//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across repositories to fulfill user stories.

pub mod catalog;
pub mod characters;
pub mod inventory;
pub mod rewards;

pub use catalog::{CatalogError, CatalogPage, CatalogUseCases, RegisterInput};
pub use characters::{CharacterError, CharacterUseCases};
pub use inventory::{InventoryError, InventoryUseCases};
pub use rewards::{ClaimGuard, ClaimReward, DispenseOutcome, RewardDispenser, RewardError};
