//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{ClockPort, EntityStore, RandomPort};
use crate::repositories::{Catalog, Characters};
use crate::use_cases::{
    CatalogUseCases, CharacterUseCases, ClaimGuard, ClaimReward, InventoryUseCases,
    RewardDispenser,
};

/// Main application state.
///
/// Holds all repositories and use cases. Shared by every command handler.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub config: EngineConfig,
}

/// Container for all repositories.
pub struct Repositories {
    pub characters: Arc<Characters>,
    pub catalog: Arc<Catalog>,
}

/// Container for all use cases.
pub struct UseCases {
    pub characters: CharacterUseCases,
    pub catalog: CatalogUseCases,
    pub inventory: InventoryUseCases,
    pub claim_reward: ClaimReward,
}

impl App {
    pub fn new(
        store: Arc<dyn EntityStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        config: EngineConfig,
    ) -> Self {
        let characters = Arc::new(Characters::new(store.clone()));
        let catalog = Arc::new(Catalog::new(store));

        let inventory = InventoryUseCases::new(
            characters.clone(),
            catalog.clone(),
            clock.clone(),
            random,
        );
        let claim_reward = ClaimReward::new(
            Arc::new(ClaimGuard::new(claim_ttl(&config))),
            catalog.clone(),
            characters.clone(),
            RewardDispenser::new(inventory.grant.clone()),
            clock.clone(),
        );

        let use_cases = UseCases {
            characters: CharacterUseCases::new(characters.clone(), clock.clone()),
            catalog: CatalogUseCases::new(catalog.clone(), clock, config.page_size),
            inventory,
            claim_reward,
        };

        Self {
            repositories: Repositories {
                characters,
                catalog,
            },
            use_cases,
            config,
        }
    }
}

fn claim_ttl(config: &EngineConfig) -> chrono::Duration {
    chrono::Duration::from_std(config.claim_ttl).unwrap_or_else(|_| chrono::Duration::days(365))
}
