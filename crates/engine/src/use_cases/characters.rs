//! Character use cases: create, list, show.

use std::sync::Arc;

use tavernkeep_domain::{Character, CharacterKey, CharacterName, DomainError, OwnerId};

use crate::infrastructure::ports::{ClockPort, RepoError};
use crate::repositories::Characters;

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("A character named {0} already exists")]
    AlreadyExists(String),
    #[error("Character not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: CreateCharacter,
    pub list: ListCharacters,
    pub show: ShowCharacter,
}

impl CharacterUseCases {
    pub fn new(characters: Arc<Characters>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            create: CreateCharacter::new(characters.clone(), clock),
            list: ListCharacters::new(characters.clone()),
            show: ShowCharacter::new(characters),
        }
    }
}

pub struct CreateCharacter {
    characters: Arc<Characters>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCharacter {
    pub fn new(characters: Arc<Characters>, clock: Arc<dyn ClockPort>) -> Self {
        Self { characters, clock }
    }

    /// Creates a character with zero currency and no items.
    ///
    /// Names that normalize to an existing character of the same owner are
    /// rejected with `AlreadyExists`.
    pub async fn execute(&self, owner_id: OwnerId, name: &str) -> Result<Character, CharacterError> {
        let name = CharacterName::new(name)?;
        let character = Character::new(owner_id, name, self.clock.now());
        let key = character.key();

        if self.characters.exists(&key).await? {
            return Err(CharacterError::AlreadyExists(character.name().to_string()));
        }

        match self.characters.save(&character, None).await {
            Ok(_) => {}
            Err(RepoError::Conflict { .. }) => {
                return Err(CharacterError::AlreadyExists(character.name().to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            character_key = %key,
            owner_id = %character.owner_id(),
            "Character created"
        );

        Ok(character)
    }
}

pub struct ListCharacters {
    characters: Arc<Characters>,
}

impl ListCharacters {
    pub fn new(characters: Arc<Characters>) -> Self {
        Self { characters }
    }

    pub async fn execute(&self, owner_id: &OwnerId) -> Result<Vec<Character>, CharacterError> {
        let list = self.characters.list_for_owner(owner_id).await?;
        tracing::debug!(owner_id = %owner_id, count = list.len(), "Listed characters");
        Ok(list)
    }
}

pub struct ShowCharacter {
    characters: Arc<Characters>,
}

impl ShowCharacter {
    pub fn new(characters: Arc<Characters>) -> Self {
        Self { characters }
    }

    pub async fn execute(&self, owner_id: &OwnerId, name: &str) -> Result<Character, CharacterError> {
        let name = CharacterName::new(name)?;
        let key = CharacterKey::new(owner_id, &name);
        self.characters
            .get(&key)
            .await?
            .ok_or_else(|| CharacterError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::memory_store::MemoryEntityStore;
    use crate::infrastructure::ports::{MockClockPort, MockEntityStore};
    use chrono::Utc;

    fn use_cases() -> CharacterUseCases {
        let store = Arc::new(MemoryEntityStore::new());
        CharacterUseCases::new(
            Arc::new(Characters::new(store)),
            Arc::new(FixedClock(Utc::now())),
        )
    }

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).unwrap()
    }

    #[tokio::test]
    async fn create_starts_with_empty_inventory() {
        let uc = use_cases();
        let link = uc.create.execute(owner("42"), "Link").await.unwrap();

        assert_eq!(link.currency(), 0);
        assert!(link.items().is_empty());

        let shown = uc.show.execute(&owner("42"), "link").await.unwrap();
        assert_eq!(shown, link);
    }

    #[tokio::test]
    async fn created_at_comes_from_clock() {
        let now = chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut clock = MockClockPort::new();
        clock.expect_now().times(1).return_const(now);

        let create = CreateCharacter::new(
            Arc::new(Characters::new(Arc::new(MemoryEntityStore::new()))),
            Arc::new(clock),
        );
        let link = create.execute(owner("42"), "Link").await.unwrap();
        assert_eq!(link.created_at(), now);
    }

    #[tokio::test]
    async fn duplicate_normalized_name_already_exists() {
        let uc = use_cases();
        uc.create.execute(owner("42"), "Iron Man").await.unwrap();

        let err = uc.create.execute(owner("42"), "  iron   MAN ").await.unwrap_err();
        assert!(matches!(err, CharacterError::AlreadyExists(_)));

        // Same name under another owner is a different character
        uc.create.execute(owner("43"), "Iron Man").await.unwrap();
    }

    #[tokio::test]
    async fn conflicting_create_is_already_exists() {
        // Another handler wrote the record between the existence check and the write
        let mut racing = MockEntityStore::new();
        racing.expect_get().returning(|_, _| Ok(None));
        racing
            .expect_write_if_unchanged()
            .returning(|ns, key, _, _| Err(RepoError::conflict(ns.as_str(), key)));
        let create = CreateCharacter::new(
            Arc::new(Characters::new(Arc::new(racing))),
            Arc::new(FixedClock(Utc::now())),
        );

        let err = create.execute(owner("42"), "Link").await.unwrap_err();
        assert!(matches!(err, CharacterError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn list_only_returns_owner_characters() {
        let uc = use_cases();
        uc.create.execute(owner("1"), "Zelda").await.unwrap();
        uc.create.execute(owner("1"), "Link").await.unwrap();
        uc.create.execute(owner("12"), "Ganon").await.unwrap();

        let names: Vec<String> = uc
            .list
            .execute(&owner("1"))
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Link", "Zelda"]);
    }

    #[tokio::test]
    async fn show_missing_is_not_found() {
        let uc = use_cases();
        let err = uc.show.execute(&owner("1"), "Nobody").await.unwrap_err();
        assert!(matches!(err, CharacterError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_name_is_validation_error() {
        let uc = use_cases();
        let err = uc.create.execute(owner("1"), "   ").await.unwrap_err();
        assert!(matches!(err, CharacterError::Validation(_)));
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let mut store = MockEntityStore::new();
        store
            .expect_get()
            .returning(|_, _| Err(RepoError::unavailable("get", "database is locked")));
        let create = CreateCharacter::new(
            Arc::new(Characters::new(Arc::new(store))),
            Arc::new(FixedClock(Utc::now())),
        );

        let err = create.execute(owner("1"), "Link").await.unwrap_err();
        assert!(matches!(
            err,
            CharacterError::Repo(RepoError::StorageUnavailable { .. })
        ));
    }
}
