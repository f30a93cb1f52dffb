//! Reward use cases.
//!
//! A reward control is a one-shot button attached to a rendered message. The
//! first press consumes it and hands the item to the pressing player's
//! character; every later press is rejected.

mod claim;
mod dispenser;
mod error;

pub use claim::{ClaimGuard, ClaimReward};
pub use dispenser::{DispenseOutcome, RewardDispenser};
pub use error::RewardError;
