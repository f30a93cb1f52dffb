//! Inventory operation errors.

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Character not found: {0}")]
    CharacterNotFound(String),
    #[error("{character} has no item named {item}")]
    ItemNotFound { character: String, item: String },
    #[error("No catalog item named {0}")]
    CatalogItemNotFound(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
