//! Reward operation errors.

use crate::infrastructure::ports::RepoError;
use crate::use_cases::inventory::InventoryError;

#[derive(Debug, thiserror::Error)]
pub enum RewardError {
    #[error("Reward {0} was already claimed")]
    AlreadyClaimed(String),
    #[error("No catalog item named {0}")]
    ItemNotFound(String),
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
