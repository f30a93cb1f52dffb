pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod keys;
pub mod value_objects;

pub use aggregates::Character;
pub use entities::{CatalogItem, CatalogKind, ItemInstance};
pub use error::DomainError;
pub use ids::ItemInstanceId;
pub use keys::{character_key, normalize, owner_prefix, CatalogKey, CharacterKey};
pub use value_objects::{
    render_page, Amount, CatalogName, CharacterName, CurrencyChange, Description, Navigation,
    OwnerId, Page, PageControls, PageDirection, PageState, Withdrawal, DEFAULT_PAGE_SIZE,
};
