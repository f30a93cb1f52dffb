//! Claim reward use case.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tavernkeep_domain::{CatalogKey, CatalogKind, OwnerId};

use crate::infrastructure::ports::ClockPort;
use crate::repositories::{Catalog, Characters};

use super::dispenser::{DispenseOutcome, RewardDispenser};
use super::error::RewardError;

/// Process-local record of consumed reward controls.
///
/// Claims are not persisted, so a restart makes old controls claimable again.
/// Entries older than `ttl` are forgotten the same way.
pub struct ClaimGuard {
    claimed: DashMap<String, DateTime<Utc>>,
    ttl: Duration,
}

impl ClaimGuard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            claimed: DashMap::new(),
            ttl,
        }
    }

    /// Marks `control_id` consumed. Returns `false` if it already was.
    ///
    /// Expired entries are pruned first.
    pub fn try_consume(&self, control_id: &str, now: DateTime<Utc>) -> bool {
        let ttl = self.ttl;
        self.claimed.retain(|_, claimed_at| now - *claimed_at < ttl);

        match self.claimed.entry(control_id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(now);
                true
            }
        }
    }

    pub fn is_consumed(&self, control_id: &str) -> bool {
        self.claimed.contains_key(control_id)
    }
}

pub struct ClaimReward {
    guard: Arc<ClaimGuard>,
    catalog: Arc<Catalog>,
    characters: Arc<Characters>,
    dispenser: RewardDispenser,
    clock: Arc<dyn ClockPort>,
}

impl ClaimReward {
    pub fn new(
        guard: Arc<ClaimGuard>,
        catalog: Arc<Catalog>,
        characters: Arc<Characters>,
        dispenser: RewardDispenser,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            guard,
            catalog,
            characters,
            dispenser,
            clock,
        }
    }

    /// Hands the item behind a reward control to the pressing player.
    ///
    /// The control is consumed before anything is looked up, so it stays
    /// consumed even when the lookup or the grant fails afterwards.
    pub async fn execute(
        &self,
        control_id: &str,
        actor: &OwnerId,
        item_name: &str,
    ) -> Result<DispenseOutcome, RewardError> {
        if !self.guard.try_consume(control_id, self.clock.now()) {
            tracing::debug!(control_id, actor = %actor, "Reward control already claimed");
            return Err(RewardError::AlreadyClaimed(control_id.to_string()));
        }

        let template = self
            .catalog
            .get(CatalogKind::Item, &CatalogKey::from_lookup(item_name))
            .await?
            .ok_or_else(|| RewardError::ItemNotFound(item_name.trim().to_string()))?;

        let candidates = self.characters.list_for_owner(actor).await?;
        let outcome = self.dispenser.dispense(&template, &candidates).await?;

        tracing::info!(
            control_id,
            actor = %actor,
            item_name = %template.name,
            assigned = matches!(outcome, DispenseOutcome::Assigned { .. }),
            "Reward claimed"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequentialRandom};
    use crate::infrastructure::memory_store::MemoryEntityStore;
    use crate::infrastructure::ports::EntityStore;
    use crate::use_cases::inventory::{fixtures, GrantItem};

    struct Harness {
        guard: Arc<ClaimGuard>,
        catalog: Arc<Catalog>,
        characters: Arc<Characters>,
        claim: ClaimReward,
    }

    fn harness() -> Harness {
        let store: Arc<dyn EntityStore> = Arc::new(MemoryEntityStore::new());
        let clock = Arc::new(FixedClock(Utc::now()));
        let characters = Arc::new(Characters::new(store.clone()));
        let catalog = Arc::new(Catalog::new(store));
        let guard = Arc::new(ClaimGuard::new(Duration::hours(24)));
        let grant = Arc::new(GrantItem::new(
            characters.clone(),
            clock.clone(),
            Arc::new(SequentialRandom::default()),
        ));
        let claim = ClaimReward::new(
            guard.clone(),
            catalog.clone(),
            characters.clone(),
            RewardDispenser::new(grant),
            clock,
        );
        Harness {
            guard,
            catalog,
            characters,
            claim,
        }
    }

    fn actor() -> OwnerId {
        OwnerId::new("42").unwrap()
    }

    #[test]
    fn guard_consumes_once() {
        let guard = ClaimGuard::new(Duration::hours(24));
        assert!(guard.try_consume("msg-1", Utc::now()));
        assert!(!guard.try_consume("msg-1", Utc::now()));
        assert!(guard.try_consume("msg-2", Utc::now()));
    }

    #[test]
    fn guard_forgets_expired_controls() {
        let guard = ClaimGuard::new(Duration::hours(1));
        let start = Utc::now();

        assert!(guard.try_consume("msg-1", start));
        assert!(guard.try_consume("msg-2", start + Duration::minutes(30)));
        assert!(!guard.try_consume("msg-1", start + Duration::minutes(59)));

        // msg-1 expired, msg-2 is still inside its window
        assert!(guard.try_consume("msg-3", start + Duration::minutes(61)));
        assert!(!guard.is_consumed("msg-1"));
        assert!(guard.is_consumed("msg-2"));
        assert!(guard.is_consumed("msg-3"));

        assert!(guard.try_consume("msg-1", start + Duration::minutes(62)));
    }

    #[tokio::test]
    async fn reward_can_only_be_claimed_once() {
        let h = harness();
        let link = fixtures::seed(&h.characters, "42", "Link", 0).await;
        h.catalog
            .insert(CatalogKind::Item, &fixtures::template("Heart Container"))
            .await
            .unwrap();

        let outcome = h
            .claim
            .execute("msg-1", &actor(), "heart container")
            .await
            .unwrap();
        assert!(matches!(outcome, DispenseOutcome::Assigned { .. }));

        let err = h
            .claim
            .execute("msg-1", &actor(), "heart container")
            .await
            .unwrap_err();
        assert!(matches!(err, RewardError::AlreadyClaimed(_)));

        let stored = h.characters.get(&link.key()).await.unwrap().unwrap();
        assert_eq!(stored.items().len(), 1);
    }

    #[tokio::test]
    async fn missing_item_still_consumes_control() {
        let h = harness();
        fixtures::seed(&h.characters, "42", "Link", 0).await;

        let err = h.claim.execute("msg-9", &actor(), "Triforce").await.unwrap_err();
        assert!(matches!(err, RewardError::ItemNotFound(_)));
        assert!(h.guard.is_consumed("msg-9"));
    }

    #[tokio::test]
    async fn several_characters_is_ambiguous() {
        let h = harness();
        fixtures::seed(&h.characters, "42", "Link", 0).await;
        fixtures::seed(&h.characters, "42", "Sheik", 0).await;
        fixtures::seed(&h.characters, "7", "Ganon", 0).await;
        h.catalog
            .insert(CatalogKind::Item, &fixtures::template("Bomb"))
            .await
            .unwrap();

        let outcome = h.claim.execute("msg-2", &actor(), "Bomb").await.unwrap();
        assert_eq!(
            outcome,
            DispenseOutcome::AmbiguousOwnership {
                candidates: vec!["Link".to_string(), "Sheik".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn actor_without_characters_gets_no_characters() {
        let h = harness();
        h.catalog
            .insert(CatalogKind::Item, &fixtures::template("Bomb"))
            .await
            .unwrap();

        let outcome = h.claim.execute("msg-3", &actor(), "Bomb").await.unwrap();
        assert_eq!(outcome, DispenseOutcome::NoCharacters);
    }
}
