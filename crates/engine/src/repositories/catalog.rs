//! Item and enemy catalog persistence.
//!
//! Both catalogs share one shape; [`CatalogKind`] picks the namespace.

use std::sync::Arc;
use tavernkeep_domain::{CatalogItem, CatalogKey, CatalogKind};

use super::{decode, encode};
use crate::infrastructure::ports::{EntityStore, Namespace, RepoError};

pub struct Catalog {
    store: Arc<dyn EntityStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn get(
        &self,
        kind: CatalogKind,
        key: &CatalogKey,
    ) -> Result<Option<CatalogItem>, RepoError> {
        self.store
            .get(Namespace::catalog(kind), key.as_str())
            .await?
            .map(|json| decode(key.as_str(), &json))
            .transpose()
    }

    pub async fn exists(&self, kind: CatalogKind, key: &CatalogKey) -> Result<bool, RepoError> {
        Ok(self
            .store
            .get(Namespace::catalog(kind), key.as_str())
            .await?
            .is_some())
    }

    /// Writes a new entry.
    ///
    /// Callers check [`Catalog::exists`] first. Under the optimistic write
    /// policy a racing insert of the same key fails with `Conflict`.
    pub async fn insert(&self, kind: CatalogKind, entry: &CatalogItem) -> Result<(), RepoError> {
        let key = entry.key();
        let json = encode(entry)?;
        self.store
            .write_if_unchanged(Namespace::catalog(kind), key.as_str(), &json, None)
            .await?;
        Ok(())
    }

    /// Returns whether an entry was removed.
    pub async fn delete(&self, kind: CatalogKind, key: &CatalogKey) -> Result<bool, RepoError> {
        self.store.delete(Namespace::catalog(kind), key.as_str()).await
    }

    /// Every entry of one catalog, ordered by key.
    pub async fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, RepoError> {
        self.store
            .scan_prefix(Namespace::catalog(kind), "")
            .await?
            .into_iter()
            .map(|(key, json)| decode(&key, &json))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::MemoryEntityStore;
    use chrono::Utc;
    use tavernkeep_domain::{CatalogName, Description, OwnerId};

    fn entry(name: &str) -> CatalogItem {
        CatalogItem::item(
            CatalogName::new(name).unwrap(),
            Description::empty(),
            OwnerId::new("gm").unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn kinds_are_separate_catalogs() {
        let catalog = Catalog::new(Arc::new(MemoryEntityStore::new()));
        let goblin = entry("Goblin");

        catalog.insert(CatalogKind::Item, &goblin).await.unwrap();

        assert!(catalog.exists(CatalogKind::Item, &goblin.key()).await.unwrap());
        assert!(!catalog.exists(CatalogKind::Enemy, &goblin.key()).await.unwrap());
    }

    #[tokio::test]
    async fn lookup_uses_normalized_name() {
        let catalog = Catalog::new(Arc::new(MemoryEntityStore::new()));
        catalog
            .insert(CatalogKind::Item, &entry("Master Sword"))
            .await
            .unwrap();

        let found = catalog
            .get(CatalogKind::Item, &CatalogKey::from_lookup("  master   SWORD "))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name.as_str(), "Master Sword");
    }

    #[tokio::test]
    async fn list_is_ordered_by_key() {
        let catalog = Catalog::new(Arc::new(MemoryEntityStore::new()));
        for name in ["Shield", "Arrow", "Potion"] {
            catalog.insert(CatalogKind::Item, &entry(name)).await.unwrap();
        }

        let names: Vec<String> = catalog
            .list(CatalogKind::Item)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name.to_string())
            .collect();
        assert_eq!(names, vec!["Arrow", "Potion", "Shield"]);
    }

    #[tokio::test]
    async fn delete_is_no_op_safe() {
        let catalog = Catalog::new(Arc::new(MemoryEntityStore::new()));
        let potion = entry("Potion");
        catalog.insert(CatalogKind::Item, &potion).await.unwrap();

        assert!(catalog.delete(CatalogKind::Item, &potion.key()).await.unwrap());
        assert!(!catalog.delete(CatalogKind::Item, &potion.key()).await.unwrap());
    }
}
