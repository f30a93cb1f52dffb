//! Inventory use cases.
//!
//! Every mutation is a two-step read-modify-write on one character record:
//! `Characters::load` then `Characters::save` with the version that was read.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::repositories::{Catalog, Characters};

mod currency;
mod error;
mod give_item;
mod grant_item;
mod remove_item;

pub use currency::{AddCurrency, AdjustCurrency};
pub use error::InventoryError;
pub use give_item::GiveItem;
pub use grant_item::GrantItem;
pub use remove_item::RemoveItem;

/// Container for inventory use cases.
pub struct InventoryUseCases {
    pub grant: Arc<GrantItem>,
    pub give: GiveItem,
    pub remove: RemoveItem,
    pub add_currency: AddCurrency,
    pub remove_currency: AdjustCurrency,
}

impl InventoryUseCases {
    pub fn new(
        characters: Arc<Characters>,
        catalog: Arc<Catalog>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let grant = Arc::new(GrantItem::new(characters.clone(), clock, random));
        Self {
            give: GiveItem::new(catalog, grant.clone()),
            grant,
            remove: RemoveItem::new(characters.clone()),
            add_currency: AddCurrency::new(characters.clone()),
            remove_currency: AdjustCurrency::new(characters),
        }
    }
}
