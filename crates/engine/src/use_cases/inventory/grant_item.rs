//! Grant item use case.
//!
//! Copies a catalog template into a character's item list.

use std::sync::Arc;
use tavernkeep_domain::{CatalogItem, CharacterKey, ItemInstance, ItemInstanceId};

use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::repositories::Characters;

use super::error::InventoryError;

pub struct GrantItem {
    characters: Arc<Characters>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl GrantItem {
    pub fn new(
        characters: Arc<Characters>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            characters,
            clock,
            random,
        }
    }

    /// Appends a fresh instance of `template` to the character's items.
    ///
    /// # Returns
    /// * `Ok(ItemInstance)` - The granted copy with its new instance id
    /// * `Err(InventoryError::CharacterNotFound)` - No character under `key`
    pub async fn execute(
        &self,
        key: &CharacterKey,
        template: &CatalogItem,
    ) -> Result<ItemInstance, InventoryError> {
        let mut stored = self
            .characters
            .load(key)
            .await?
            .ok_or_else(|| InventoryError::CharacterNotFound(key.to_string()))?;

        let instance_id = ItemInstanceId::from_uuid(self.random.gen_uuid());
        let instance = template.instantiate(instance_id, self.clock.now());
        stored.character.grant(instance.clone());

        self.characters
            .save(&stored.character, Some(stored.version))
            .await?;

        tracing::info!(
            character_key = %key,
            instance_id = %instance.instance_id,
            item_name = %instance.name(),
            "Item granted to character"
        );

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequentialRandom};
    use crate::infrastructure::memory_store::MemoryEntityStore;
    use crate::infrastructure::ports::{MockEntityStore, RepoError, Version, VersionedRecord};
    use crate::use_cases::inventory::fixtures;
    use chrono::Utc;
    use uuid::Uuid;

    fn grant(characters: Arc<Characters>) -> GrantItem {
        GrantItem::new(
            characters,
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialRandom::default()),
        )
    }

    #[tokio::test]
    async fn grant_appends_copy_with_new_instance_id() {
        let characters = Arc::new(Characters::new(Arc::new(MemoryEntityStore::new())));
        let link = fixtures::seed(&characters, "42", "Link", 0).await;
        let sword = fixtures::template("Master Sword");
        let use_case = grant(characters.clone());

        let first = use_case.execute(&link.key(), &sword).await.unwrap();
        let second = use_case.execute(&link.key(), &sword).await.unwrap();

        assert_eq!(first.instance_id.to_uuid(), Uuid::from_u128(1));
        assert_eq!(second.instance_id.to_uuid(), Uuid::from_u128(2));
        assert_eq!(first.template, sword);

        let stored = characters.get(&link.key()).await.unwrap().unwrap();
        assert_eq!(stored.items(), &[first, second]);
    }

    #[tokio::test]
    async fn missing_character_is_not_found() {
        let characters = Arc::new(Characters::new(Arc::new(MemoryEntityStore::new())));
        let key = fixtures::key("42", "Nobody");

        let err = grant(characters)
            .execute(&key, &fixtures::template("Shield"))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::CharacterNotFound(_)));
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let link = fixtures::character("42", "Link");
        let json = serde_json::to_string(&link).unwrap();

        let mut store = MockEntityStore::new();
        store.expect_read().returning(move |_, _| {
            Ok(Some(VersionedRecord {
                value: json.clone(),
                version: Version::new(1),
            }))
        });
        store
            .expect_write_if_unchanged()
            .returning(|_, _, _, _| Err(RepoError::unavailable("write_if_unchanged", "disk full")));

        let err = grant(Arc::new(Characters::new(Arc::new(store))))
            .execute(&link.key(), &fixtures::template("Shield"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Repo(RepoError::StorageUnavailable { .. })
        ));
    }
}
