//! Entity store port.
//!
//! One logical key-value store, partitioned into a namespace per entity kind.
//! Values are opaque JSON text; typed access lives in `crate::repositories`.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use tavernkeep_domain::CatalogKind;

use super::error::RepoError;

/// Partition of the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Characters,
    Items,
    Enemies,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Items => "items",
            Self::Enemies => "enemies",
        }
    }

    pub fn catalog(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Item => Self::Items,
            CatalogKind::Enemy => Self::Enemies,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque version token returned by [`EntityStore::read`].
///
/// Every successful write bumps the stored version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(i64);

impl Version {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// A stored value together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedRecord {
    pub value: String,
    pub version: Version,
}

/// How [`EntityStore::write_if_unchanged`] treats its version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Ignore the token: the later of two racing writes silently wins.
    #[default]
    LastWriteWins,
    /// Reject a write whose token no longer matches with `RepoError::Conflict`.
    Optimistic,
}

impl FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_write_wins" | "lww" => Ok(Self::LastWriteWins),
            "optimistic" => Ok(Self::Optimistic),
            other => Err(format!("unknown write policy: {}", other)),
        }
    }
}

/// Namespaced key-value persistence.
///
/// Writes are durable before they return. Absent keys are `Ok(None)` from the
/// read methods; callers translate that into a not-found outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get(&self, namespace: Namespace, key: &str) -> Result<Option<String>, RepoError>;

    /// Unconditional upsert.
    async fn set(&self, namespace: Namespace, key: &str, value: &str) -> Result<(), RepoError>;

    /// Removes a key. Returns whether a record existed; deleting an absent key
    /// is not an error.
    async fn delete(&self, namespace: Namespace, key: &str) -> Result<bool, RepoError>;

    /// All `(key, value)` pairs whose key starts with `prefix`, ordered by key.
    async fn scan_prefix(
        &self,
        namespace: Namespace,
        prefix: &str,
    ) -> Result<Vec<(String, String)>, RepoError>;

    /// First half of a read-modify-write: the value plus its version token.
    async fn read(
        &self,
        namespace: Namespace,
        key: &str,
    ) -> Result<Option<VersionedRecord>, RepoError>;

    /// Second half of a read-modify-write.
    ///
    /// `expected` is the token from [`EntityStore::read`], or `None` when the
    /// caller saw no record (create). Whether a mismatch is rejected depends on
    /// the store's [`WritePolicy`]. Returns the new version.
    async fn write_if_unchanged(
        &self,
        namespace: Namespace,
        key: &str,
        value: &str,
        expected: Option<Version>,
    ) -> Result<Version, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_are_distinct() {
        assert_eq!(Namespace::catalog(CatalogKind::Item), Namespace::Items);
        assert_eq!(Namespace::catalog(CatalogKind::Enemy), Namespace::Enemies);
        assert_ne!(Namespace::Items.as_str(), Namespace::Characters.as_str());
    }

    #[test]
    fn parse_write_policy() {
        assert_eq!(
            "Optimistic".parse::<WritePolicy>().unwrap(),
            WritePolicy::Optimistic
        );
        assert_eq!(
            "last_write_wins".parse::<WritePolicy>().unwrap(),
            WritePolicy::LastWriteWins
        );
        assert!("strict".parse::<WritePolicy>().is_err());
    }
}
