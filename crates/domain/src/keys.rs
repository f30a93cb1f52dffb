//! Storage key codec.
//!
//! Keys are derived from display names and never converted back: the display
//! name is always stored alongside the record.
//!
//! - Catalog templates: `normalize(name)`
//! - Characters: `owner_id:normalize(name)`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{CatalogName, CharacterName, OwnerId};

/// Separates the owner id from the normalized character name.
pub const KEY_SEPARATOR: char = ':';

/// Replaces each whitespace run in a normalized name.
pub const WORD_JOINER: char = '_';

/// Lowercases `text` and replaces every whitespace run with a single `_`.
///
/// Leading and trailing whitespace is dropped, so `"  Iron  Sword "` and
/// `"iron sword"` both normalize to `"iron_sword"`.
pub fn normalize(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            key.push(WORD_JOINER);
        }
        key.extend(word.chars().flat_map(char::to_lowercase));
    }
    key
}

/// Key of a character record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterKey(String);

impl CharacterKey {
    pub fn new(owner_id: &OwnerId, name: &CharacterName) -> Self {
        Self(format!(
            "{}{}",
            owner_prefix(owner_id),
            normalize(name.as_str())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a catalog template (items and enemies live in separate namespaces).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(String);

impl CatalogKey {
    pub fn new(name: &CatalogName) -> Self {
        Self(normalize(name.as_str()))
    }

    /// Key for a raw lookup string, e.g. a name typed into a command.
    pub fn from_lookup(text: &str) -> Self {
        Self(normalize(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `owner_id + ":" + normalize(name)`.
pub fn character_key(owner_id: &OwnerId, name: &CharacterName) -> CharacterKey {
    CharacterKey::new(owner_id, name)
}

/// Prefix shared by every character key of one owner.
pub fn owner_prefix(owner_id: &OwnerId) -> String {
    format!("{}{}", owner_id.as_str(), KEY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).unwrap()
    }

    fn name(n: &str) -> CharacterName {
        CharacterName::new(n).unwrap()
    }

    #[test]
    fn normalize_lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("Iron Sword"), "iron_sword");
        assert_eq!(normalize("  Iron \t\n  Sword  "), "iron_sword");
        assert_eq!(normalize("POTION"), "potion");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("Big  Red Dragon");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn character_key_is_stable() {
        let a = character_key(&owner("42"), &name("Link"));
        let b = character_key(&owner("42"), &name("Link"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "42:link");
    }

    #[test]
    fn character_key_treats_normalize_equal_names_as_same() {
        let a = character_key(&owner("42"), &name("Old  Link"));
        let b = character_key(&owner("42"), &name("old link"));
        assert_eq!(a, b);
    }

    #[test]
    fn character_key_is_injective_across_owners_and_names() {
        let owners = ["1", "12", "123", "alice", "bob"];
        let names = ["Link", "Zelda", "1 Link", "2", "link zelda", "Link Zelda 2"];

        let mut seen = HashSet::new();
        let mut pairs = HashSet::new();
        for o in owners {
            for n in names {
                pairs.insert((o.to_string(), normalize(n)));
                seen.insert(character_key(&owner(o), &name(n)));
            }
        }
        assert_eq!(seen.len(), pairs.len());
    }

    #[test]
    fn owner_prefix_matches_only_that_owner() {
        let key = character_key(&owner("12"), &name("Link"));
        assert!(key.as_str().starts_with(&owner_prefix(&owner("12"))));
        assert!(!key.as_str().starts_with(&owner_prefix(&owner("1"))));
    }

    #[test]
    fn catalog_key_from_lookup_matches_registered_name() {
        let registered = CatalogKey::new(&CatalogName::new("Healing Potion").unwrap());
        assert_eq!(registered, CatalogKey::from_lookup("healing   POTION"));
    }
}
