//! Page counts and "has more" signals.
//!
//! The directory API never reports a total, so browse mode estimates one.

use serde::Serialize;

/// Pages assumed to lie ahead while browsing and the server keeps returning
/// full pages.
const BROWSE_LOOKAHEAD: u32 = 10;

/// Lower bound for the browsing estimate.
const BROWSE_MIN_PAGES: u32 = 100;

/// Widest page strip that is shown without gaps.
const WINDOW_FULL: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// Local matches when searching; `None` while browsing
    pub total_matches: Option<usize>,
}

impl PaginationMeta {
    /// Metadata for search mode, paging over `matches` local results.
    pub fn searching(page: u32, page_size: u32, matches: usize) -> Self {
        let page_size = page_size.max(1) as usize;
        let total_pages = matches.div_ceil(page_size).max(1);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        PaginationMeta {
            page,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
            total_matches: Some(matches),
        }
    }

    /// Metadata for browse mode given the size of the batch the server returned.
    ///
    /// A full page implies there may be more; a short or empty page is the last.
    pub fn browsing(page: u32, page_size: u32, batch_len: usize) -> Self {
        let has_next_page = batch_len > 0 && batch_len == page_size as usize && page < u32::MAX;
        let total_pages = if has_next_page {
            page.saturating_add(BROWSE_LOOKAHEAD).max(BROWSE_MIN_PAGES)
        } else {
            page
        };
        PaginationMeta {
            page,
            total_pages,
            has_next_page,
            has_previous_page: page > 1,
            total_matches: None,
        }
    }
}

/// One entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

/// The page-number strip around `page`.
///
/// Shows every page when there are at most seven; otherwise keeps the first
/// and last page visible with gaps around the current neighbourhood.
pub fn page_window(page: u32, total_pages: u32) -> Vec<PageItem> {
    let total = total_pages.max(1);
    let page = page.clamp(1, total);

    if total <= WINDOW_FULL {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = Vec::with_capacity(WINDOW_FULL as usize);
    if page <= 4 {
        items.extend((1..=5).map(PageItem::Page));
        items.push(PageItem::Gap);
        items.push(PageItem::Page(total));
    } else if page >= total - 3 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Gap);
        items.extend((total - 4..=total).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Gap);
        items.extend((page - 1..=page + 1).map(PageItem::Page));
        items.push(PageItem::Gap);
        items.push(PageItem::Page(total));
    }
    items
}
