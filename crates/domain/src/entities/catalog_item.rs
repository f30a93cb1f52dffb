//! Catalog templates - reusable item and enemy definitions
//!
//! Catalog entries live in a global, owner-less namespace per kind and are
//! keyed by their normalized name. They are never edited in place: an entry is
//! registered once and may later be deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::ItemInstanceId;
use crate::keys::{normalize, CatalogKey};
use crate::value_objects::{CatalogName, Description, OwnerId};

/// Which catalog a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Item,
    Enemy,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Item, CatalogKind::Enemy];

    /// Human label used in messages ("Item", "Enemy").
    pub fn label(self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Enemy => "Enemy",
        }
    }

    /// Title of the rendered listing. Paired with the page caption, this is how
    /// a navigation request identifies which catalog it belongs to.
    pub fn listing_title(self) -> &'static str {
        match self {
            Self::Item => "Item Catalog",
            Self::Enemy => "Enemy Catalog",
        }
    }

    pub fn from_listing_title(title: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.listing_title() == title)
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CatalogKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item" | "items" => Ok(Self::Item),
            "enemy" | "enemies" => Ok(Self::Enemy),
            other => Err(DomainError::parse(format!("Unknown catalog kind: {}", other))),
        }
    }
}

/// A reusable template registered in the item or enemy catalog.
///
/// Any combination of already-validated fields is a valid template, so the
/// fields are public. `hp` is only set on enemies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: CatalogName,
    #[serde(default)]
    pub description: Description,
    /// Image URL or attachment reference rendered by the chat collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Hit points (enemies only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    pub registered_by: OwnerId,
    pub registered_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Create an item template.
    pub fn item(
        name: CatalogName,
        description: Description,
        registered_by: OwnerId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            description,
            image_ref: None,
            hp: None,
            registered_by,
            registered_at: now,
        }
    }

    /// Create an enemy template.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `hp` is zero.
    pub fn enemy(
        name: CatalogName,
        description: Description,
        hp: u32,
        registered_by: OwnerId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if hp == 0 {
            return Err(DomainError::validation("Enemy hp must be greater than zero"));
        }
        Ok(Self {
            hp: Some(hp),
            ..Self::item(name, description, registered_by, now)
        })
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        let image_ref = image_ref.into();
        self.image_ref = (!image_ref.trim().is_empty()).then(|| image_ref.trim().to_string());
        self
    }

    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(&self.name)
    }

    /// Deep copy handed to a character; later catalog changes do not affect it.
    pub fn instantiate(&self, instance_id: ItemInstanceId, now: DateTime<Utc>) -> ItemInstance {
        ItemInstance {
            instance_id,
            template: self.clone(),
            granted_at: now,
        }
    }
}

/// A granted copy of a catalog template owned by exactly one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub instance_id: ItemInstanceId,
    #[serde(flatten)]
    pub template: CatalogItem,
    pub granted_at: DateTime<Utc>,
}

impl ItemInstance {
    pub fn name(&self) -> &CatalogName {
        &self.template.name
    }

    /// Matches when both names normalize to the same catalog key.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize(self.template.name.as_str()) == normalize(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion() -> CatalogItem {
        CatalogItem::item(
            CatalogName::new("Healing Potion").unwrap(),
            Description::new("Restores 10 hp").unwrap(),
            OwnerId::new("gm").unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn enemy_requires_positive_hp() {
        let name = CatalogName::new("Goblin").unwrap();
        let owner = OwnerId::new("gm").unwrap();
        assert!(CatalogItem::enemy(name.clone(), Description::empty(), 0, owner.clone(), Utc::now()).is_err());
        let goblin = CatalogItem::enemy(name, Description::empty(), 7, owner, Utc::now()).unwrap();
        assert_eq!(goblin.hp, Some(7));
    }

    #[test]
    fn blank_image_is_dropped() {
        assert_eq!(potion().with_image("   ").image_ref, None);
        assert_eq!(
            potion().with_image(" https://img/p.png ").image_ref.as_deref(),
            Some("https://img/p.png")
        );
    }

    #[test]
    fn instance_is_independent_copy() {
        let mut template = potion();
        let instance = template.instantiate(ItemInstanceId::new(), Utc::now());
        template.description = Description::new("changed").unwrap();
        assert_eq!(instance.template.description.as_str(), "Restores 10 hp");
    }

    #[test]
    fn matches_name_ignores_case() {
        let instance = potion().instantiate(ItemInstanceId::new(), Utc::now());
        assert!(instance.matches_name("healing POTION"));
        assert!(!instance.matches_name("healing"));
    }

    #[test]
    fn matches_name_collapses_inner_whitespace() {
        let sword = CatalogItem::item(
            CatalogName::new("Iron  Sword").unwrap(),
            Description::empty(),
            OwnerId::new("gm").unwrap(),
            Utc::now(),
        );
        let instance = sword.instantiate(ItemInstanceId::new(), Utc::now());
        assert!(instance.matches_name("IRON SWORD"));
        assert!(instance.matches_name(" iron\tsword "));
        assert!(!instance.matches_name("ironsword"));
    }

    #[test]
    fn instance_serializes_flat() {
        let instance = potion().instantiate(ItemInstanceId::new(), Utc::now());
        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(json["name"], "Healing Potion");
        assert!(json.get("template").is_none());
        assert!(json.get("hp").is_none());

        let back: ItemInstance = serde_json::from_value(json).unwrap();
        assert_eq!(back, instance);
    }

    #[test]
    fn listing_title_identifies_kind() {
        for kind in CatalogKind::ALL {
            assert_eq!(CatalogKind::from_listing_title(kind.listing_title()), Some(kind));
        }
        assert_eq!(CatalogKind::from_listing_title("Inventory"), None);
    }
}
