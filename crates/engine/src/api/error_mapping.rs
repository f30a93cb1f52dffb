//! Use-case errors to render results.
//!
//! User-facing outcomes (not found, duplicates, bad input) are rendered with
//! their message and are not logged as errors. Infrastructure failures are
//! logged in full here and rendered as a generic retryable failure that leaks
//! no internal detail.

use tavernkeep_domain::DomainError;

use super::render::RenderResult;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::{CatalogError, CharacterError, InventoryError, RewardError};

/// Message used for every infrastructure failure.
pub fn retry_message(operation: &str) -> String {
    format!("Failed to {} - please try again", operation)
}

/// Sanitize a repository error.
///
/// Logs the full error server-side, returns a generic failure for the client.
pub fn render_repo_error(error: &RepoError, operation: &str) -> RenderResult {
    match error {
        RepoError::Conflict { .. } => {
            tracing::warn!(error = %error, operation, "Concurrent modification rejected");
            RenderResult::failure(format!(
                "Someone else changed this while you were editing. Failed to {} - please try again",
                operation
            ))
        }
        RepoError::StorageUnavailable { .. } | RepoError::Serialization(_) => {
            tracing::error!(error = %error, operation, "Repository error");
            RenderResult::failure(retry_message(operation))
        }
    }
}

pub fn render_domain_error(error: &DomainError) -> RenderResult {
    match error {
        DomainError::Validation(msg) | DomainError::InvalidAmount(msg) | DomainError::Parse(msg) => {
            RenderResult::user_error(msg.clone())
        }
    }
}

pub fn render_character_error(error: &CharacterError, operation: &str) -> RenderResult {
    match error {
        CharacterError::AlreadyExists(_) => RenderResult::user_error(error.to_string()),
        CharacterError::NotFound(_) => RenderResult::not_found(error.to_string()),
        CharacterError::Validation(e) => render_domain_error(e),
        CharacterError::Repo(e) => render_repo_error(e, operation),
    }
}

pub fn render_catalog_error(error: &CatalogError, operation: &str) -> RenderResult {
    match error {
        CatalogError::AlreadyExists { .. } | CatalogError::UnknownListing(_) => {
            RenderResult::user_error(error.to_string())
        }
        CatalogError::NotFound { .. } => RenderResult::not_found(error.to_string()),
        CatalogError::Validation(e) => render_domain_error(e),
        CatalogError::Repo(e) => render_repo_error(e, operation),
    }
}

pub fn render_inventory_error(error: &InventoryError, operation: &str) -> RenderResult {
    match error {
        InventoryError::CharacterNotFound(_)
        | InventoryError::ItemNotFound { .. }
        | InventoryError::CatalogItemNotFound(_) => RenderResult::not_found(error.to_string()),
        InventoryError::Repo(e) => render_repo_error(e, operation),
    }
}

pub fn render_reward_error(error: &RewardError, operation: &str) -> RenderResult {
    match error {
        RewardError::AlreadyClaimed(_) => RenderResult::user_error(error.to_string()),
        RewardError::ItemNotFound(_) => RenderResult::not_found(error.to_string()),
        RewardError::Inventory(e) => render_inventory_error(e, operation),
        RewardError::Repo(e) => render_repo_error(e, operation),
    }
}
