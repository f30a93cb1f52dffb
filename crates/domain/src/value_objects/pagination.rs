//! Stateless catalog pagination.
//!
//! No session is kept between renders. The current position travels inside the
//! rendered listing as a footer caption (`"Page 2 of 3"`) and is decoded again
//! when the next navigation request arrives. [`PageState::caption`] and
//! [`PageState::from_caption`] must stay byte-for-byte symmetric.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::DomainError;

/// Default number of entries per catalog page
pub const DEFAULT_PAGE_SIZE: usize = 10;

static CAPTION_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::unwrap_used)]
fn caption_regex() -> &'static Regex {
    CAPTION_REGEX
        .get_or_init(|| Regex::new(r"^Page ([1-9][0-9]*) of ([1-9][0-9]*)$").unwrap())
}

/// `max(1, ceil(len / page_size))`. A zero page size is treated as one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// One visible slice of an ordered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_index: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn state(&self) -> PageState {
        PageState {
            page_index: self.page_index.min(self.total_pages - 1),
            total_pages: self.total_pages,
        }
    }
}

/// Slices `items` for the zero-based `page_index`.
///
/// The index is not bounds-checked: an index past the end yields an empty
/// slice, callers clamp with [`PageState::clamped`] first.
pub fn render_page<T>(items: &[T], page_index: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        items: &items[start..end],
        page_index,
        total_pages: total_pages(items.len(), page_size),
    }
}

/// Which way a navigation control moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Previous,
    Next,
}

impl FromStr for PageDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous" | "prev" | "back" => Ok(Self::Previous),
            "next" | "forward" => Ok(Self::Next),
            other => Err(DomainError::parse(format!(
                "Unknown page direction: {}",
                other
            ))),
        }
    }
}

/// Zero-based page position plus the page count it was rendered with.
///
/// # Invariants
///
/// - `total_pages >= 1`
/// - `page_index < total_pages`
///
/// Only built through [`PageState::new`], [`PageState::clamped`] or a decoded
/// caption, never deserialized directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_index: usize,
    total_pages: usize,
}

/// Result of applying a [`PageDirection`] to a [`PageState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub state: PageState,
    /// The move would have left the valid range and was clamped.
    pub at_boundary: bool,
}

/// Which navigation controls should be enabled for a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PageState {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `page_index < total_pages`.
    pub fn new(page_index: usize, total_pages: usize) -> Result<Self, DomainError> {
        if total_pages == 0 || page_index >= total_pages {
            return Err(DomainError::validation(format!(
                "page index {} out of range for {} pages",
                page_index, total_pages
            )));
        }
        Ok(Self {
            page_index,
            total_pages,
        })
    }

    pub fn first(total_pages: usize) -> Self {
        Self {
            page_index: 0,
            total_pages: total_pages.max(1),
        }
    }

    /// Builds a state from any index, pulling it into `0..total_pages`.
    pub fn clamped(page_index: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page_index: page_index.min(total_pages - 1),
            total_pages,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_first(&self) -> bool {
        self.page_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.page_index + 1 == self.total_pages
    }

    /// Moves one page, clamping at either end instead of wrapping.
    pub fn navigate(self, direction: PageDirection) -> Navigation {
        let (page_index, at_boundary) = match direction {
            PageDirection::Previous if self.is_first() => (self.page_index, true),
            PageDirection::Previous => (self.page_index - 1, false),
            PageDirection::Next if self.is_last() => (self.page_index, true),
            PageDirection::Next => (self.page_index + 1, false),
        };
        Navigation {
            state: Self {
                page_index,
                total_pages: self.total_pages,
            },
            at_boundary,
        }
    }

    /// Re-fits the position after the listing changed size between renders.
    pub fn rebase(self, total_pages: usize) -> Self {
        Self::clamped(self.page_index, total_pages)
    }

    pub fn controls(&self) -> PageControls {
        PageControls {
            previous_enabled: !self.is_first(),
            next_enabled: !self.is_last(),
        }
    }

    /// Footer caption carried by a rendered page (one-based for display).
    pub fn caption(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.total_pages)
    }

    /// Decodes a caption produced by [`PageState::caption`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if the text is not an exact caption, or
    /// `DomainError::Validation` if the page number exceeds the page count.
    pub fn from_caption(caption: &str) -> Result<Self, DomainError> {
        let captures = caption_regex()
            .captures(caption)
            .ok_or_else(|| DomainError::parse(format!("Not a page caption: {:?}", caption)))?;

        let page_number: usize = captures[1]
            .parse()
            .map_err(|_| DomainError::parse("Page number out of range"))?;
        let total_pages: usize = captures[2]
            .parse()
            .map_err(|_| DomainError::parse("Page count out of range"))?;

        Self::new(page_number - 1, total_pages)
    }
}
