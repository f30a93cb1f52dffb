//! Reward dispenser.
//!
//! Decides which character receives a reward. Exactly one candidate gets the
//! item; with several candidates nothing is granted and the caller is told so.
//! No candidate is ever picked on the player's behalf.

use std::sync::Arc;
use tavernkeep_domain::{CatalogItem, Character, ItemInstance};

use crate::use_cases::inventory::{GrantItem, InventoryError};

/// Where a reward ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispenseOutcome {
    Assigned {
        character_name: String,
        instance: ItemInstance,
    },
    /// The actor owns several characters; names of all candidates in key order.
    AmbiguousOwnership { candidates: Vec<String> },
    /// The actor owns no character.
    NoCharacters,
}

pub struct RewardDispenser {
    grant: Arc<GrantItem>,
}

impl RewardDispenser {
    pub fn new(grant: Arc<GrantItem>) -> Self {
        Self { grant }
    }

    /// `candidates` are the characters of the single actor claiming the reward.
    pub async fn dispense(
        &self,
        template: &CatalogItem,
        candidates: &[Character],
    ) -> Result<DispenseOutcome, InventoryError> {
        match candidates {
            [] => Ok(DispenseOutcome::NoCharacters),
            [only] => {
                let instance = self.grant.execute(&only.key(), template).await?;
                Ok(DispenseOutcome::Assigned {
                    character_name: only.name().to_string(),
                    instance,
                })
            }
            many => {
                tracing::debug!(
                    item_name = %template.name,
                    candidates = many.len(),
                    "Reward ownership ambiguous, nothing granted"
                );
                Ok(DispenseOutcome::AmbiguousOwnership {
                    candidates: many.iter().map(|c| c.name().to_string()).collect(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequentialRandom};
    use crate::infrastructure::memory_store::MemoryEntityStore;
    use crate::infrastructure::ports::MockEntityStore;
    use crate::repositories::Characters;
    use crate::use_cases::inventory::fixtures;
    use chrono::Utc;

    fn dispenser(characters: Arc<Characters>) -> RewardDispenser {
        RewardDispenser::new(Arc::new(GrantItem::new(
            characters,
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialRandom::default()),
        )))
    }

    #[tokio::test]
    async fn no_candidates_is_no_characters() {
        // A store that panics on any call proves nothing is touched
        let characters = Arc::new(Characters::new(Arc::new(MockEntityStore::new())));
        let outcome = dispenser(characters)
            .dispense(&fixtures::template("Bomb"), &[])
            .await
            .unwrap();
        assert_eq!(outcome, DispenseOutcome::NoCharacters);
    }

    #[tokio::test]
    async fn single_candidate_is_assigned() {
        let characters = Arc::new(Characters::new(Arc::new(MemoryEntityStore::new())));
        let link = fixtures::seed(&characters, "42", "Link", 0).await;

        let outcome = dispenser(characters.clone())
            .dispense(&fixtures::template("Bomb"), std::slice::from_ref(&link))
            .await
            .unwrap();

        let DispenseOutcome::Assigned {
            character_name,
            instance,
        } = outcome
        else {
            panic!("expected the reward to be assigned");
        };
        assert_eq!(character_name, "Link");
        assert_eq!(instance.name().as_str(), "Bomb");

        let stored = characters.get(&link.key()).await.unwrap().unwrap();
        assert_eq!(stored.items(), &[instance]);
    }

    #[tokio::test]
    async fn several_candidates_leave_store_unchanged() {
        let characters = Arc::new(Characters::new(Arc::new(MemoryEntityStore::new())));
        let a = fixtures::seed(&characters, "42", "Link", 0).await;
        let b = fixtures::seed(&characters, "42", "Zelda", 0).await;

        let outcome = dispenser(characters.clone())
            .dispense(&fixtures::template("Bomb"), &[a.clone(), b.clone()])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DispenseOutcome::AmbiguousOwnership {
                candidates: vec!["Link".to_string(), "Zelda".to_string()]
            }
        );
        assert_eq!(characters.get(&a.key()).await.unwrap(), Some(a));
        assert_eq!(characters.get(&b.key()).await.unwrap(), Some(b));
    }
}
