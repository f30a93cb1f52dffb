//! Repository modules - typed access over the entity store.
//!
//! Each repository serializes domain records to JSON and owns the choice of
//! namespace and key for its records.

pub mod catalog;
pub mod characters;

pub use catalog::Catalog;
pub use characters::{Characters, StoredCharacter};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::infrastructure::ports::RepoError;

fn encode<T: Serialize>(value: &T) -> Result<String, RepoError> {
    serde_json::to_string(value).map_err(RepoError::serialization)
}

fn decode<T: DeserializeOwned>(key: &str, json: &str) -> Result<T, RepoError> {
    serde_json::from_str(json)
        .map_err(|e| RepoError::serialization(format!("record {}: {}", key, e)))
}
