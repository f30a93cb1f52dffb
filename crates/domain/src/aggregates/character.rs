//! Character aggregate - a player's persistent character in a session
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: currency and items only change through methods
//! - **Newtypes**: `CharacterName` and `OwnerId` are valid by construction
//! - **Outcome values**: mutations return what happened (`CurrencyChange`,
//!   the removed `ItemInstance`) instead of mutating silently

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::ItemInstance;
use crate::keys::CharacterKey;
use crate::value_objects::{Amount, CharacterName, CurrencyChange, OwnerId, Withdrawal};

/// A player character owned by one external account.
///
/// # Invariants
///
/// - `currency` never goes below zero (unsigned, withdrawals clamp)
/// - `items` keeps insertion order
/// - identity is `(owner_id, normalize(name))`, see [`Character::key`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    name: CharacterName,
    owner_id: OwnerId,
    currency: u64,
    items: Vec<ItemInstance>,
    created_at: DateTime<Utc>,
}

impl Character {
    pub fn new(owner_id: OwnerId, name: CharacterName, now: DateTime<Utc>) -> Self {
        Self {
            name,
            owner_id,
            currency: 0,
            items: Vec::new(),
            created_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn key(&self) -> CharacterKey {
        CharacterKey::new(&self.owner_id, &self.name)
    }

    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    pub fn items(&self) -> &[ItemInstance] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_currency(mut self, currency: u64) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_item(mut self, item: ItemInstance) -> Self {
        self.items.push(item);
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a granted item at the end of the list.
    pub fn grant(&mut self, item: ItemInstance) {
        self.items.push(item);
    }

    /// Removes the first item whose name normalizes to the same key as `name`.
    pub fn remove_item_by_name(&mut self, name: &str) -> Option<ItemInstance> {
        let index = self.items.iter().position(|item| item.matches_name(name))?;
        Some(self.items.remove(index))
    }

    /// Takes currency, clamping so the balance never goes negative.
    pub fn withdraw(&mut self, withdrawal: Withdrawal) -> CurrencyChange {
        let change = CurrencyChange::withdraw(self.currency, withdrawal);
        self.currency = change.current;
        change
    }

    /// Adds currency and returns the new balance. Saturates at `u64::MAX`.
    pub fn deposit(&mut self, amount: Amount) -> u64 {
        self.currency = self.currency.saturating_add(amount.get());
        self.currency
    }
}

// =============================================================================
// Serialization
// =============================================================================

#[derive(Serialize, Deserialize)]
struct CharacterWireFormat {
    name: CharacterName,
    owner_id: OwnerId,
    #[serde(default)]
    currency: u64,
    #[serde(default)]
    items: Vec<ItemInstance>,
    created_at: DateTime<Utc>,
}

impl Serialize for Character {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = CharacterWireFormat {
            name: self.name.clone(),
            owner_id: self.owner_id.clone(),
            currency: self.currency,
            items: self.items.clone(),
            created_at: self.created_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Character {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CharacterWireFormat::deserialize(deserializer)?;

        Ok(Character {
            name: wire.name,
            owner_id: wire.owner_id,
            currency: wire.currency,
            items: wire.items,
            created_at: wire.created_at,
        })
    }
}
