//! Detail view resolution.
//!
//! The directory API cannot fetch a record by identifier, so the detail view
//! only ever shows records already held in the cache.

use crate::error::{Result, UserdexError};
use crate::store::UserStore;
use crate::types::User;

/// Route prefix of the detail view.
pub const DETAIL_ROUTE_PREFIX: &str = "/user/";

/// Message shown when a routed id is not in the cache.
pub const NOT_FOUND_MESSAGE: &str = "User not found, return to the listing";

/// Look `id` up in the cache. Never touches the network.
pub fn resolve_by_id<'a>(store: &'a UserStore, id: &str) -> Result<&'a User> {
    store
        .get(id)
        .ok_or_else(|| UserdexError::RecordNotFound(id.to_string()))
}

/// What the detail view renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome<'a> {
    Found(&'a User),
    NotFound { id: String, message: &'static str },
}

impl<'a> DetailOutcome<'a> {
    pub fn resolve(store: &'a UserStore, id: &str) -> Self {
        match resolve_by_id(store, id) {
            Ok(user) => DetailOutcome::Found(user),
            Err(_) => DetailOutcome::NotFound {
                id: id.to_string(),
                message: NOT_FOUND_MESSAGE,
            },
        }
    }

    pub fn user(&self) -> Option<&'a User> {
        match self {
            DetailOutcome::Found(user) => Some(*user),
            DetailOutcome::NotFound { .. } => None,
        }
    }
}

/// `/user/<id>` for a record identifier.
pub fn detail_route(id: &str) -> String {
    format!("{DETAIL_ROUTE_PREFIX}{id}")
}

/// Extract the identifier from a `/user/<id>` route.
///
/// The identifier is opaque; only an empty one or one containing further
/// path segments is rejected.
pub fn parse_detail_route(route: &str) -> Option<&str> {
    let id = route.strip_prefix(DETAIL_ROUTE_PREFIX)?;
    let id = id.strip_suffix('/').unwrap_or(id);
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}
