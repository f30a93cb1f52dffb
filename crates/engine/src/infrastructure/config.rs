//! Engine configuration from `TAVERNKEEP_*` environment variables.
//!
//! Supported variables:
//! - TAVERNKEEP_STORE: `sqlite` (default) or `memory`
//! - TAVERNKEEP_DB_PATH: SQLite file path (default `tavernkeep.db`)
//! - TAVERNKEEP_PAGE_SIZE: catalog page size (range: 1-25, default 10)
//! - TAVERNKEEP_WRITE_POLICY: `last_write_wins` (default) or `optimistic`
//! - TAVERNKEEP_BUSY_TIMEOUT_MS: SQLite busy timeout (default 5000)
//! - TAVERNKEEP_ACQUIRE_TIMEOUT_MS: pool acquire timeout (default 5000)
//! - TAVERNKEEP_MAX_CONNECTIONS: pool size (default 8)
//! - TAVERNKEEP_CLAIM_TTL_SECS: how long a claimed reward control is remembered
//!   (default 86400)
//!
//! Invalid values are logged and replaced by the default.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tavernkeep_domain::DEFAULT_PAGE_SIZE;

use super::ports::WritePolicy;
use super::sqlite_store::SqliteStoreOptions;

const MAX_PAGE_SIZE: usize = 25;

const DEFAULT_CLAIM_TTL_SECS: u64 = 24 * 60 * 60;

/// Which [`EntityStore`](super::ports::EntityStore) adapter to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" | "in_memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub store: StoreBackend,
    pub db_path: String,
    pub page_size: usize,
    pub write_policy: WritePolicy,
    pub busy_timeout: Duration,
    pub acquire_timeout: Duration,
    pub max_connections: u32,
    pub claim_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            db_path: "tavernkeep.db".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            write_policy: WritePolicy::default(),
            busy_timeout: Duration::from_millis(5000),
            acquire_timeout: Duration::from_millis(5000),
            max_connections: 8,
            claim_ttl: Duration::from_secs(DEFAULT_CLAIM_TTL_SECS),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let page_size = env_or(&lookup, "TAVERNKEEP_PAGE_SIZE", defaults.page_size);
        let page_size = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
            page_size
        } else {
            tracing::warn!(
                page_size,
                "TAVERNKEEP_PAGE_SIZE out of range [1, {}], ignoring",
                MAX_PAGE_SIZE
            );
            defaults.page_size
        };

        Self {
            store: env_or(&lookup, "TAVERNKEEP_STORE", defaults.store),
            db_path: lookup("TAVERNKEEP_DB_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.db_path),
            page_size,
            write_policy: env_or(&lookup, "TAVERNKEEP_WRITE_POLICY", defaults.write_policy),
            busy_timeout: Duration::from_millis(env_or(
                &lookup,
                "TAVERNKEEP_BUSY_TIMEOUT_MS",
                5000u64,
            )),
            acquire_timeout: Duration::from_millis(env_or(
                &lookup,
                "TAVERNKEEP_ACQUIRE_TIMEOUT_MS",
                5000u64,
            )),
            max_connections: env_or(
                &lookup,
                "TAVERNKEEP_MAX_CONNECTIONS",
                defaults.max_connections,
            )
            .max(1),
            claim_ttl: Duration::from_secs(
                env_or(
                    &lookup,
                    "TAVERNKEEP_CLAIM_TTL_SECS",
                    DEFAULT_CLAIM_TTL_SECS,
                )
                .max(1),
            ),
        }
    }

    pub fn sqlite_options(&self) -> SqliteStoreOptions {
        SqliteStoreOptions {
            busy_timeout: self.busy_timeout,
            acquire_timeout: self.acquire_timeout,
            max_connections: self.max_connections,
            write_policy: self.write_policy,
        }
    }
}

fn env_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(name) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(variable = name, value = %raw, error = %e, "Invalid value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.store, StoreBackend::Sqlite);
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TAVERNKEEP_STORE", "memory"),
            ("TAVERNKEEP_DB_PATH", "/tmp/game.db"),
            ("TAVERNKEEP_PAGE_SIZE", "5"),
            ("TAVERNKEEP_WRITE_POLICY", "optimistic"),
            ("TAVERNKEEP_BUSY_TIMEOUT_MS", "250"),
            ("TAVERNKEEP_CLAIM_TTL_SECS", "600"),
        ]));

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.db_path, "/tmp/game.db");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.write_policy, WritePolicy::Optimistic);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.acquire_timeout, Duration::from_millis(5000));
        assert_eq!(config.claim_ttl, Duration::from_secs(600));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TAVERNKEEP_STORE", "postgres"),
            ("TAVERNKEEP_PAGE_SIZE", "0"),
            ("TAVERNKEEP_WRITE_POLICY", "strict"),
            ("TAVERNKEEP_BUSY_TIMEOUT_MS", "soon"),
        ]));

        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn oversized_page_size_is_ignored() {
        let config = EngineConfig::from_lookup(lookup_from(&[("TAVERNKEEP_PAGE_SIZE", "500")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
