//! Domain entities - Core business objects

mod catalog_item;

pub use catalog_item::{CatalogItem, CatalogKind, ItemInstance};
