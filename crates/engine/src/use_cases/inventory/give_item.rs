//! Give item use case.
//!
//! Looks up an item template in the catalog and grants a copy of it to a
//! player character.

use std::sync::Arc;
use tavernkeep_domain::{CatalogKey, CatalogKind, CharacterKey, ItemInstance};

use crate::repositories::Catalog;

use super::error::InventoryError;
use super::grant_item::GrantItem;

/// Give item use case.
///
/// Orchestrates: catalog lookup, then [`GrantItem`].
pub struct GiveItem {
    catalog: Arc<Catalog>,
    grant: Arc<GrantItem>,
}

impl GiveItem {
    pub fn new(catalog: Arc<Catalog>, grant: Arc<GrantItem>) -> Self {
        Self { catalog, grant }
    }

    /// # Returns
    /// * `Ok(ItemInstance)` - Item given successfully
    /// * `Err(InventoryError::CatalogItemNotFound)` - No item template by that name
    /// * `Err(InventoryError::CharacterNotFound)` - No character under `key`
    pub async fn execute(
        &self,
        key: &CharacterKey,
        item_name: &str,
    ) -> Result<ItemInstance, InventoryError> {
        let template = self
            .catalog
            .get(CatalogKind::Item, &CatalogKey::from_lookup(item_name))
            .await?
            .ok_or_else(|| InventoryError::CatalogItemNotFound(item_name.trim().to_string()))?;

        self.grant.execute(key, &template).await
    }
}
