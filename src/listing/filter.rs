//! Local filtering and slicing for search mode.

use crate::store::queries::matches_search;
use crate::types::User;

/// Users matching `search_text`, in batch order.
///
/// The needle is the text lowercased as typed, without trimming or
/// tokenisation. An empty needle matches everything.
pub fn filter_users<'a>(users: &'a [User], search_text: &str) -> Vec<&'a User> {
    let needle = search_text.to_lowercase();
    users.iter().filter(|u| matches_search(u, &needle)).collect()
}

/// The `page`-th window of `page_size` items, empty when out of range.
pub fn page_slice<T>(items: &[T], page: u32, page_size: u32) -> &[T] {
    let page_size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
