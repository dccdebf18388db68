//! Pagination and search reconciliation.
//!
//! The listing has two modes. While browsing, the server pages: each page is
//! one request for exactly `page_size` records. While searching, one request
//! pulls a large pool which is filtered and paged locally, since the API has
//! no text search.

mod controller;
pub mod debounce;
pub mod filter;
pub mod pagination;

use serde::Serialize;

use crate::remote::FetchParams;
use crate::types::{Batch, Gender, Nationality, User};

pub use controller::{FetchOutcome, ListingController, PendingFetch};
pub use debounce::Debouncer;
pub use filter::{filter_users, page_slice};
pub use pagination::{PageItem, PaginationMeta, page_window};

/// Request sizing and fixed parameters for the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub page_size: u32,
    pub search_pool_size: u32,
    pub nationalities: Vec<Nationality>,
    pub version: Option<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            search_pool_size: crate::types::MAX_RESULTS,
            nationalities: Vec::new(),
            version: None,
        }
    }
}

/// What the user asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_text: String,
    pub gender: Option<Gender>,
    /// 1-based
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            gender: None,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Searching,
}

impl FilterState {
    pub fn mode(&self) -> Mode {
        if self.search_text.trim().is_empty() {
            Mode::Browsing
        } else {
            Mode::Searching
        }
    }
}

/// Decide the request for a filter state.
///
/// Browsing asks the server for one page. Searching asks for the whole pool
/// and leaves `page` unset so the server starts from its first page.
pub fn fetch_params(filter: &FilterState, config: &ListingConfig) -> FetchParams {
    let params = FetchParams::new()
        .gender(filter.gender)
        .nat(config.nationalities.clone())
        .version(config.version.clone());

    match filter.mode() {
        Mode::Browsing => params.results(config.page_size).page(filter.page.max(1)),
        Mode::Searching => params.results(config.search_pool_size),
    }
}

/// Records to show for `filter` out of `batch`, with pagination metadata.
pub fn visible(
    filter: &FilterState,
    batch: &Batch,
    config: &ListingConfig,
) -> (Vec<User>, PaginationMeta) {
    let page = filter.page.max(1);
    match filter.mode() {
        Mode::Browsing => (
            batch.results.clone(),
            PaginationMeta::browsing(page, config.page_size, batch.len()),
        ),
        Mode::Searching => {
            let matches = filter_users(&batch.results, &filter.search_text);
            let records = page_slice(&matches, page, config.page_size)
                .iter()
                .map(|u| (*u).clone())
                .collect();
            (
                records,
                PaginationMeta::searching(page, config.page_size, matches.len()),
            )
        }
    }
}

/// Everything the listing screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub records: Vec<User>,
    pub is_loading: bool,
    /// Message of the last failed fetch; cleared by the next success
    pub error: Option<String>,
    pub pagination: PaginationMeta,
}

impl Default for ListingView {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            is_loading: false,
            error: None,
            pagination: PaginationMeta::browsing(1, 1, 0),
        }
    }
}
