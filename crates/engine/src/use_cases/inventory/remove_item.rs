//! Remove item use case.

use std::sync::Arc;
use tavernkeep_domain::{CharacterKey, ItemInstance};

use crate::repositories::Characters;

use super::error::InventoryError;

/// Takes one item away from a character by display name.
pub struct RemoveItem {
    characters: Arc<Characters>,
}

impl RemoveItem {
    pub fn new(characters: Arc<Characters>) -> Self {
        Self { characters }
    }

    /// Removes the first item whose name matches `item_name` case-insensitively.
    pub async fn execute(
        &self,
        key: &CharacterKey,
        item_name: &str,
    ) -> Result<ItemInstance, InventoryError> {
        let mut stored = self
            .characters
            .load(key)
            .await?
            .ok_or_else(|| InventoryError::CharacterNotFound(key.to_string()))?;

        let removed = stored
            .character
            .remove_item_by_name(item_name)
            .ok_or_else(|| InventoryError::ItemNotFound {
                character: stored.character.name().to_string(),
                item: item_name.trim().to_string(),
            })?;

        self.characters
            .save(&stored.character, Some(stored.version))
            .await?;

        tracing::info!(
            character_key = %key,
            instance_id = %removed.instance_id,
            item_name = %removed.name(),
            "Item removed from character"
        );

        Ok(removed)
    }
}
