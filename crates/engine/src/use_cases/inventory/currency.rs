//! Currency use cases.
//!
//! Amounts arrive already parsed: `Amount` cannot be zero and `Withdrawal`
//! parsing rejects negative or non-numeric text with `InvalidAmount`.

use std::sync::Arc;
use tavernkeep_domain::{Amount, CharacterKey, CurrencyChange, Withdrawal};

use crate::repositories::Characters;

use super::error::InventoryError;

/// Removes currency from a character, clamping at zero.
pub struct AdjustCurrency {
    characters: Arc<Characters>,
}

impl AdjustCurrency {
    pub fn new(characters: Arc<Characters>) -> Self {
        Self { characters }
    }

    pub async fn execute(
        &self,
        key: &CharacterKey,
        withdrawal: Withdrawal,
    ) -> Result<CurrencyChange, InventoryError> {
        let mut stored = self
            .characters
            .load(key)
            .await?
            .ok_or_else(|| InventoryError::CharacterNotFound(key.to_string()))?;

        let change = stored.character.withdraw(withdrawal);
        self.characters
            .save(&stored.character, Some(stored.version))
            .await?;

        tracing::info!(
            character_key = %key,
            previous = change.previous,
            removed = change.removed,
            current = change.current,
            "Currency removed"
        );

        Ok(change)
    }
}

/// Adds currency to a character and returns the new balance.
pub struct AddCurrency {
    characters: Arc<Characters>,
}

impl AddCurrency {
    pub fn new(characters: Arc<Characters>) -> Self {
        Self { characters }
    }

    pub async fn execute(&self, key: &CharacterKey, amount: Amount) -> Result<u64, InventoryError> {
        let mut stored = self
            .characters
            .load(key)
            .await?
            .ok_or_else(|| InventoryError::CharacterNotFound(key.to_string()))?;

        let balance = stored.character.deposit(amount);
        self.characters
            .save(&stored.character, Some(stored.version))
            .await?;

        tracing::info!(
            character_key = %key,
            added = amount.get(),
            balance,
            "Currency added"
        );

        Ok(balance)
    }
}
