//! Catalog use cases: register, show, delete, browse.
//!
//! Items and enemies share every operation; [`CatalogKind`] selects which
//! catalog is touched.

use std::sync::Arc;

use tavernkeep_domain::value_objects::pagination::total_pages;
use tavernkeep_domain::{
    render_page, CatalogItem, CatalogKey, CatalogKind, CatalogName, Description, DomainError,
    OwnerId, PageDirection, PageState,
};

use crate::infrastructure::ports::{ClockPort, RepoError};
use crate::repositories::Catalog;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: CatalogKind, name: String },
    #[error("{kind} not found: {name}")]
    NotFound { kind: CatalogKind, name: String },
    #[error("Not a catalog listing: {0}")]
    UnknownListing(String),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Container for catalog use cases.
pub struct CatalogUseCases {
    pub register: RegisterCatalogEntry,
    pub show: ShowCatalogEntry,
    pub delete: DeleteCatalogEntry,
    pub browse: BrowseCatalog,
}

impl CatalogUseCases {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn ClockPort>, page_size: usize) -> Self {
        Self {
            register: RegisterCatalogEntry::new(catalog.clone(), clock),
            show: ShowCatalogEntry::new(catalog.clone()),
            delete: DeleteCatalogEntry::new(catalog.clone()),
            browse: BrowseCatalog::new(catalog, page_size),
        }
    }
}

// =============================================================================
// Register
// =============================================================================

/// Raw registration fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub name: String,
    pub description: String,
    pub image_ref: Option<String>,
    /// Required for enemies, ignored for items.
    pub hp: Option<u32>,
}

pub struct RegisterCatalogEntry {
    catalog: Arc<Catalog>,
    clock: Arc<dyn ClockPort>,
}

impl RegisterCatalogEntry {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn ClockPort>) -> Self {
        Self { catalog, clock }
    }

    pub async fn execute(
        &self,
        kind: CatalogKind,
        registered_by: OwnerId,
        input: RegisterInput,
    ) -> Result<CatalogItem, CatalogError> {
        let name = CatalogName::new(input.name)?;
        let description = Description::new(input.description)?;
        let now = self.clock.now();

        let mut entry = match kind {
            CatalogKind::Item => CatalogItem::item(name, description, registered_by, now),
            CatalogKind::Enemy => {
                let hp = input
                    .hp
                    .ok_or_else(|| DomainError::validation("Enemy hp is required"))?;
                CatalogItem::enemy(name, description, hp, registered_by, now)?
            }
        };
        if let Some(image_ref) = input.image_ref {
            entry = entry.with_image(image_ref);
        }

        let key = entry.key();
        if self.catalog.exists(kind, &key).await? {
            return Err(CatalogError::AlreadyExists {
                kind,
                name: entry.name.to_string(),
            });
        }

        match self.catalog.insert(kind, &entry).await {
            Ok(()) => {}
            Err(RepoError::Conflict { .. }) => {
                return Err(CatalogError::AlreadyExists {
                    kind,
                    name: entry.name.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            kind = %kind,
            catalog_key = %key,
            registered_by = %entry.registered_by,
            "Catalog entry registered"
        );

        Ok(entry)
    }
}

// =============================================================================
// Show / Delete
// =============================================================================

pub struct ShowCatalogEntry {
    catalog: Arc<Catalog>,
}

impl ShowCatalogEntry {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self, kind: CatalogKind, name: &str) -> Result<CatalogItem, CatalogError> {
        let key = CatalogKey::from_lookup(name);
        self.catalog
            .get(kind, &key)
            .await?
            .ok_or_else(|| CatalogError::NotFound {
                kind,
                name: name.trim().to_string(),
            })
    }
}

pub struct DeleteCatalogEntry {
    catalog: Arc<Catalog>,
}

impl DeleteCatalogEntry {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Removes an entry. Characters keep any instances already granted from it.
    pub async fn execute(&self, kind: CatalogKind, name: &str) -> Result<(), CatalogError> {
        let key = CatalogKey::from_lookup(name);
        if !self.catalog.delete(kind, &key).await? {
            return Err(CatalogError::NotFound {
                kind,
                name: name.trim().to_string(),
            });
        }

        tracing::info!(kind = %kind, catalog_key = %key, "Catalog entry deleted");
        Ok(())
    }
}

// =============================================================================
// Browse
// =============================================================================

/// One rendered page of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub kind: CatalogKind,
    pub entries: Vec<CatalogItem>,
    pub state: PageState,
    /// The requested move was clamped at the first or last page.
    pub at_boundary: bool,
}

pub struct BrowseCatalog {
    catalog: Arc<Catalog>,
    page_size: usize,
}

impl BrowseCatalog {
    pub fn new(catalog: Arc<Catalog>, page_size: usize) -> Self {
        Self {
            catalog,
            page_size: page_size.max(1),
        }
    }

    /// Renders a listing at a one-based `page` (first page when absent).
    ///
    /// Out-of-range page numbers are clamped to the nearest valid page.
    pub async fn open(
        &self,
        kind: CatalogKind,
        page: Option<usize>,
    ) -> Result<CatalogPage, CatalogError> {
        let entries = self.catalog.list(kind).await?;
        let total = total_pages(entries.len(), self.page_size);
        let state = PageState::clamped(page.unwrap_or(1).saturating_sub(1), total);

        tracing::debug!(kind = %kind, count = entries.len(), page = state.page_index(), "Catalog listed");

        Ok(self.slice(kind, &entries, state, false))
    }

    /// Moves an already rendered listing one page.
    ///
    /// `listing_title` and `caption` are read back from the rendered listing
    /// the control belongs to. The decoded position is re-fitted to the
    /// current catalog size before moving, so entries added or removed since
    /// the last render never produce an empty page.
    pub async fn navigate(
        &self,
        listing_title: &str,
        caption: &str,
        direction: PageDirection,
    ) -> Result<CatalogPage, CatalogError> {
        let kind = CatalogKind::from_listing_title(listing_title)
            .ok_or_else(|| CatalogError::UnknownListing(listing_title.to_string()))?;
        let decoded = PageState::from_caption(caption)?;

        let entries = self.catalog.list(kind).await?;
        let current = decoded.rebase(total_pages(entries.len(), self.page_size));
        let navigation = current.navigate(direction);

        tracing::debug!(
            kind = %kind,
            from = decoded.page_index(),
            to = navigation.state.page_index(),
            at_boundary = navigation.at_boundary,
            "Catalog page navigated"
        );

        Ok(self.slice(kind, &entries, navigation.state, navigation.at_boundary))
    }

    fn slice(
        &self,
        kind: CatalogKind,
        entries: &[CatalogItem],
        state: PageState,
        at_boundary: bool,
    ) -> CatalogPage {
        let page = render_page(entries, state.page_index(), self.page_size);
        CatalogPage {
            kind,
            entries: page.items.to_vec(),
            state: page.state(),
            at_boundary,
        }
    }
}
