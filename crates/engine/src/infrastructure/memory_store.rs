//! In-memory entity store for tests and throwaway sessions.
//!
//! Same semantics as the SQLite adapter (ordered prefix scans, versions,
//! write policy), without durability.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{
    EntityStore, Namespace, RepoError, Version, VersionedRecord, WritePolicy,
};

type Partition = BTreeMap<String, (String, i64)>;

#[derive(Default)]
pub struct MemoryEntityStore {
    data: RwLock<HashMap<Namespace, Partition>>,
    write_policy: WritePolicy,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(write_policy: WritePolicy) -> Self {
        Self {
            data: RwLock::default(),
            write_policy,
        }
    }

    /// Number of records in a namespace.
    pub async fn len(&self, namespace: Namespace) -> usize {
        self.data
            .read()
            .await
            .get(&namespace)
            .map_or(0, BTreeMap::len)
    }
}

fn put(partition: &mut Partition, key: &str, value: &str) -> Version {
    let next = partition.get(key).map_or(1, |(_, version)| version + 1);
    partition.insert(key.to_string(), (value.to_string(), next));
    Version::new(next)
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn get(&self, namespace: Namespace, key: &str) -> Result<Option<String>, RepoError> {
        Ok(self
            .data
            .read()
            .await
            .get(&namespace)
            .and_then(|partition| partition.get(key))
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, namespace: Namespace, key: &str, value: &str) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        put(data.entry(namespace).or_default(), key, value);
        Ok(())
    }

    async fn delete(&self, namespace: Namespace, key: &str) -> Result<bool, RepoError> {
        let mut data = self.data.write().await;
        Ok(data
            .get_mut(&namespace)
            .and_then(|partition| partition.remove(key))
            .is_some())
    }

    async fn scan_prefix(
        &self,
        namespace: Namespace,
        prefix: &str,
    ) -> Result<Vec<(String, String)>, RepoError> {
        let data = self.data.read().await;
        let Some(partition) = data.get(&namespace) else {
            return Ok(Vec::new());
        };

        Ok(partition
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, (value, _))| (key.clone(), value.clone()))
            .collect())
    }

    async fn read(
        &self,
        namespace: Namespace,
        key: &str,
    ) -> Result<Option<VersionedRecord>, RepoError> {
        Ok(self
            .data
            .read()
            .await
            .get(&namespace)
            .and_then(|partition| partition.get(key))
            .map(|(value, version)| VersionedRecord {
                value: value.clone(),
                version: Version::new(*version),
            }))
    }

    async fn write_if_unchanged(
        &self,
        namespace: Namespace,
        key: &str,
        value: &str,
        expected: Option<Version>,
    ) -> Result<Version, RepoError> {
        let mut data = self.data.write().await;
        let partition = data.entry(namespace).or_default();

        if self.write_policy == WritePolicy::Optimistic {
            let current = partition.get(key).map(|(_, version)| Version::new(*version));
            if current != expected {
                return Err(RepoError::conflict(namespace.as_str(), key));
            }
        }

        Ok(put(partition, key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = MemoryEntityStore::new();
        assert_eq!(store.get(Namespace::Items, "nothing").await.unwrap(), None);
        assert_eq!(store.read(Namespace::Items, "nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = MemoryEntityStore::new();
        store.set(Namespace::Enemies, "goblin", "{}").await.unwrap();

        assert!(store.delete(Namespace::Enemies, "goblin").await.unwrap());
        assert!(!store.delete(Namespace::Enemies, "goblin").await.unwrap());
        assert_eq!(store.len(Namespace::Enemies).await, 0);
    }

    #[tokio::test]
    async fn scan_prefix_matches_only_prefix() {
        let store = MemoryEntityStore::new();
        for key in ["2:impa", "1:zelda", "12:ganon", "1:link"] {
            store.set(Namespace::Characters, key, key).await.unwrap();
        }

        let found = store.scan_prefix(Namespace::Characters, "1:").await.unwrap();
        assert_eq!(
            found,
            vec![
                ("1:link".to_string(), "1:link".to_string()),
                ("1:zelda".to_string(), "1:zelda".to_string()),
            ]
        );
        assert!(store
            .scan_prefix(Namespace::Items, "1:")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn optimistic_policy_detects_lost_update() {
        let store = MemoryEntityStore::with_policy(WritePolicy::Optimistic);
        store
            .write_if_unchanged(Namespace::Characters, "1:link", "0", None)
            .await
            .unwrap();

        let a = store.read(Namespace::Characters, "1:link").await.unwrap().unwrap();
        let b = store.read(Namespace::Characters, "1:link").await.unwrap().unwrap();

        store
            .write_if_unchanged(Namespace::Characters, "1:link", "a", Some(a.version))
            .await
            .unwrap();
        let err = store
            .write_if_unchanged(Namespace::Characters, "1:link", "b", Some(b.version))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Conflict { .. }));
        assert_eq!(
            store.get(Namespace::Characters, "1:link").await.unwrap().as_deref(),
            Some("a")
        );
    }

    #[tokio::test]
    async fn last_write_wins_accepts_stale_token() {
        let store = MemoryEntityStore::new();
        store.set(Namespace::Characters, "1:link", "0").await.unwrap();
        let seen = store.read(Namespace::Characters, "1:link").await.unwrap().unwrap();

        store
            .write_if_unchanged(Namespace::Characters, "1:link", "a", Some(seen.version))
            .await
            .unwrap();
        let version = store
            .write_if_unchanged(Namespace::Characters, "1:link", "b", Some(seen.version))
            .await
            .unwrap();

        assert_eq!(version, Version::new(3));
        assert_eq!(
            store.get(Namespace::Characters, "1:link").await.unwrap().as_deref(),
            Some("b")
        );
    }
}
