//! Value objects - Immutable objects defined by their attributes

mod currency;
mod names;
pub mod pagination;

pub use currency::{Amount, CurrencyChange, Withdrawal};
pub use names::{CatalogName, CharacterName, Description, OwnerId};
pub use pagination::{
    render_page, total_pages, Navigation, Page, PageControls, PageDirection, PageState,
    DEFAULT_PAGE_SIZE,
};
