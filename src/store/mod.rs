//! Normalized entity cache.
//!
//! Every user ever fetched in this session lives here, in first-seen order,
//! together with an id -> position index. The detail view resolves records
//! from this cache because the directory API has no lookup by identifier.

pub mod queries;

use std::collections::HashMap;

use crate::types::{Batch, FetchMeta, User};

/// Ordered user sequence plus id index and the selected-record slot.
///
/// Invariant: every user in `users` has exactly one `index` entry pointing at
/// its position, and `index` holds no id absent from `users`.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Vec<User>,
    index: HashMap<String, usize>,
    selected: Option<User>,
    api_info: Option<FetchMeta>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb a fetched batch.
    ///
    /// Known ids are replaced in place and keep their position; new ids are
    /// appended. The batch metadata, when present, replaces `api_info`.
    pub fn merge(&mut self, batch: &Batch) {
        for user in &batch.results {
            self.upsert(user.clone());
        }
        if batch.info.is_some() {
            self.api_info = batch.info.clone();
        }
        tracing::debug!(
            "Merged {} records, cache now holds {}",
            batch.len(),
            self.users.len()
        );
    }

    fn upsert(&mut self, user: User) {
        if user.id().is_empty() {
            tracing::debug!("Skipping record without an id (login excluded?)");
            return;
        }
        match self.index.get(user.id()) {
            Some(&pos) => self.users[pos] = user,
            None => {
                self.index.insert(user.id().to_string(), self.users.len());
                self.users.push(user);
            }
        }
    }

    /// Set or clear the selected record.
    pub fn select(&mut self, user: Option<User>) {
        self.selected = user;
    }

    /// Replace a known record. Unknown ids are ignored. A matching selection
    /// is refreshed too.
    pub fn update(&mut self, user: User) -> bool {
        let Some(&pos) = self.index.get(user.id()) else {
            return false;
        };
        if let Some(selected) = self.selected.as_mut()
            && selected.id() == user.id()
        {
            *selected = user.clone();
        }
        self.users[pos] = user;
        true
    }

    /// Delete a record from both structures and clear a matching selection.
    pub fn remove(&mut self, id: &str) -> Option<User> {
        let pos = self.index.remove(id)?;
        let removed = self.users.remove(pos);
        for user in &self.users[pos..] {
            if let Some(slot) = self.index.get_mut(user.id()) {
                *slot -= 1;
            }
        }
        if self.selected.as_ref().is_some_and(|s| s.id() == id) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Empty everything, including metadata and selection.
    pub fn clear(&mut self) {
        self.users.clear();
        self.index.clear();
        self.selected = None;
        self.api_info = None;
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.index.get(id).map(|&pos| &self.users[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All users in first-seen order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn selected(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    pub fn api_info(&self) -> Option<&FetchMeta> {
        self.api_info.as_ref()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Whether the index and the sequence agree.
    pub fn is_consistent(&self) -> bool {
        self.index.len() == self.users.len()
            && self
                .users
                .iter()
                .enumerate()
                .all(|(pos, user)| self.index.get(user.id()) == Some(&pos))
    }
}
