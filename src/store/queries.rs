//! Read-only selectors over the user cache.

use std::collections::BTreeSet;

use crate::types::User;

use super::UserStore;

pub fn user_count(store: &UserStore) -> usize {
    store.len()
}

pub fn has_users(store: &UserStore) -> bool {
    !store.is_empty()
}

pub fn by_id<'a>(store: &'a UserStore, id: &str) -> Option<&'a User> {
    store.get(id)
}

pub fn by_gender<'a>(store: &'a UserStore, gender: &str) -> Vec<&'a User> {
    store
        .users()
        .iter()
        .filter(|u| u.gender.eq_ignore_ascii_case(gender))
        .collect()
}

pub fn by_nationality<'a>(store: &'a UserStore, nat: &str) -> Vec<&'a User> {
    store
        .users()
        .iter()
        .filter(|u| u.nat.eq_ignore_ascii_case(nat))
        .collect()
}

pub fn by_country<'a>(store: &'a UserStore, country: &str) -> Vec<&'a User> {
    let country = country.to_lowercase();
    store
        .users()
        .iter()
        .filter(|u| u.location.country.to_lowercase() == country)
        .collect()
}

/// Case-insensitive substring match on first name, last name, email,
/// username or "first last".
pub fn matches_search(user: &User, needle_lower: &str) -> bool {
    let first = user.name.first.to_lowercase();
    let last = user.name.last.to_lowercase();
    first.contains(needle_lower)
        || last.contains(needle_lower)
        || user.email.to_lowercase().contains(needle_lower)
        || user.login.username.to_lowercase().contains(needle_lower)
        || format!("{first} {last}").contains(needle_lower)
}

pub fn by_search_term<'a>(store: &'a UserStore, term: &str) -> Vec<&'a User> {
    let needle = term.to_lowercase();
    store
        .users()
        .iter()
        .filter(|u| matches_search(u, &needle))
        .collect()
}

pub fn by_email<'a>(store: &'a UserStore, email: &str) -> Option<&'a User> {
    store
        .users()
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
}

pub fn by_username<'a>(store: &'a UserStore, username: &str) -> Option<&'a User> {
    store
        .users()
        .iter()
        .find(|u| u.login.username == username)
}

pub fn full_name(store: &UserStore, id: &str) -> Option<String> {
    store.get(id).map(User::full_name)
}

pub fn full_address(store: &UserStore, id: &str) -> Option<String> {
    store.get(id).map(User::full_address)
}

/// Distinct nationality codes, sorted.
pub fn unique_nationalities(store: &UserStore) -> Vec<String> {
    store
        .users()
        .iter()
        .filter(|u| !u.nat.is_empty())
        .map(|u| u.nat.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct countries, sorted.
pub fn unique_countries(store: &UserStore) -> Vec<String> {
    store
        .users()
        .iter()
        .filter(|u| !u.location.country.is_empty())
        .map(|u| u.location.country.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct genders in first-seen order.
pub fn unique_genders(store: &UserStore) -> Vec<String> {
    let mut seen = Vec::new();
    for user in store.users() {
        if !user.gender.is_empty() && !seen.contains(&user.gender) {
            seen.push(user.gender.clone());
        }
    }
    seen
}

/// Users whose age falls within `min..=max`.
pub fn by_age_range(store: &UserStore, min: u32, max: u32) -> Vec<&User> {
    store
        .users()
        .iter()
        .filter(|u| (min..=max).contains(&u.dob.age))
        .collect()
}

pub fn api_seed(store: &UserStore) -> Option<&str> {
    store.api_info().and_then(|i| i.seed.as_deref())
}

pub fn api_results(store: &UserStore) -> Option<u32> {
    store.api_info().and_then(|i| i.results)
}

pub fn api_page(store: &UserStore) -> Option<u32> {
    store.api_info().and_then(|i| i.page)
}

pub fn api_version(store: &UserStore) -> Option<&str> {
    store.api_info().and_then(|i| i.version.as_deref())
}
