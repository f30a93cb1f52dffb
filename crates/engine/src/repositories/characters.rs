//! Character persistence.

use std::sync::Arc;
use tavernkeep_domain::{owner_prefix, Character, CharacterKey, OwnerId};

use super::{decode, encode};
use crate::infrastructure::ports::{EntityStore, Namespace, RepoError, Version};

/// A character together with the version it was read at.
#[derive(Debug, Clone)]
pub struct StoredCharacter {
    pub character: Character,
    pub version: Version,
}

/// Character repository over the `characters` namespace.
pub struct Characters {
    store: Arc<dyn EntityStore>,
}

impl Characters {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, key: &CharacterKey) -> Result<Option<Character>, RepoError> {
        self.store
            .get(Namespace::Characters, key.as_str())
            .await?
            .map(|json| decode(key.as_str(), &json))
            .transpose()
    }

    pub async fn exists(&self, key: &CharacterKey) -> Result<bool, RepoError> {
        Ok(self
            .store
            .get(Namespace::Characters, key.as_str())
            .await?
            .is_some())
    }

    /// Read half of a read-modify-write.
    pub async fn load(&self, key: &CharacterKey) -> Result<Option<StoredCharacter>, RepoError> {
        let Some(record) = self.store.read(Namespace::Characters, key.as_str()).await? else {
            return Ok(None);
        };

        Ok(Some(StoredCharacter {
            character: decode(key.as_str(), &record.value)?,
            version: record.version,
        }))
    }

    /// Write half of a read-modify-write. `expected` is `None` for a new character.
    pub async fn save(
        &self,
        character: &Character,
        expected: Option<Version>,
    ) -> Result<Version, RepoError> {
        let key = character.key();
        let json = encode(character)?;
        self.store
            .write_if_unchanged(Namespace::Characters, key.as_str(), &json, expected)
            .await
    }

    /// All characters of one owner, ordered by key.
    pub async fn list_for_owner(&self, owner_id: &OwnerId) -> Result<Vec<Character>, RepoError> {
        self.store
            .scan_prefix(Namespace::Characters, &owner_prefix(owner_id))
            .await?
            .into_iter()
            .map(|(key, json)| decode(&key, &json))
            .collect()
    }
}
