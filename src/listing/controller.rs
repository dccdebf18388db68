use crate::error::{Result, UserdexError};
use crate::remote::{CollectionSource, FetchParams};
use crate::state::{GENDER_KEY, KeyValueStore, PAGE_KEY, Persisted};
use crate::store::UserStore;
use crate::types::{Batch, Gender, User};

use super::{FilterState, ListingConfig, ListingView, fetch_params, visible};

/// A fetch that has been started but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: u64,
    pub params: FetchParams,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The batch was merged and is now shown.
    Applied,
    /// The fetch failed; the view holds a retryable error.
    Failed,
    /// A newer fetch was started meanwhile; the result was dropped.
    Stale,
}

#[derive(Debug, Clone)]
struct Request {
    ticket: u64,
    filter: FilterState,
    params: FetchParams,
}

/// Owns the listing state and drives fetches through a [`CollectionSource`].
///
/// Page and gender are mirrored to `K` on every change. All event handlers
/// take `&mut self`; the only suspension point is the remote call in
/// [`refresh`](Self::refresh).
pub struct ListingController<S, K> {
    source: S,
    storage: K,
    config: ListingConfig,
    search_text: String,
    // "" when unset
    gender: Persisted<String>,
    page: Persisted<u32>,
    store: UserStore,
    batch: Option<Batch>,
    shown: Option<Request>,
    latest: Option<Request>,
    next_ticket: u64,
    view: ListingView,
}

impl<S, K> ListingController<S, K>
where
    S: CollectionSource,
    K: KeyValueStore,
{
    /// Create a controller, restoring page and gender from `storage`.
    pub fn new(source: S, mut storage: K, config: ListingConfig) -> Self {
        let gender = Persisted::load(&storage, GENDER_KEY, String::new());
        let mut page = Persisted::load(&storage, PAGE_KEY, 1u32);
        if *page.get() == 0 {
            page.set(&mut storage, 1);
        }
        Self {
            source,
            storage,
            config,
            search_text: String::new(),
            gender,
            page,
            store: UserStore::new(),
            batch: None,
            shown: None,
            latest: None,
            next_ticket: 0,
            view: ListingView::default(),
        }
    }

    pub fn filter(&self) -> FilterState {
        FilterState {
            search_text: self.search_text.clone(),
            gender: self.gender(),
            page: *self.page.get(),
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        let raw = self.gender.get();
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(gender) => Some(gender),
            Err(e) => {
                tracing::warn!("Ignoring stored gender filter: {e}");
                None
            }
        }
    }

    pub fn page(&self) -> u32 {
        *self.page.get()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn view(&self) -> &ListingView {
        &self.view
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut UserStore {
        &mut self.store
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// The last batch that was applied.
    pub fn latest_batch(&self) -> Option<&Batch> {
        self.batch.as_ref()
    }

    /// Parameters of the most recently started fetch.
    pub fn last_params(&self) -> Option<&FetchParams> {
        self.latest.as_ref().map(|r| &r.params)
    }

    /// Parameters the current filter state calls for.
    pub fn current_params(&self) -> FetchParams {
        fetch_params(&self.filter(), &self.config)
    }

    pub fn on_search(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.set_page(1);
    }

    pub fn on_gender_change(&mut self, gender: Option<Gender>) {
        let raw = gender.map(|g| g.to_string()).unwrap_or_default();
        self.gender.set(&mut self.storage, raw);
        self.set_page(1);
    }

    pub fn on_page_change(&mut self, page: u32) -> Result<()> {
        if page == 0 {
            return Err(UserdexError::InvalidPage(page.to_string()));
        }
        self.set_page(page);
        Ok(())
    }

    /// Select a record for the detail view and return its route.
    pub fn on_record_activate(&mut self, user: &User) -> String {
        self.store.select(Some(user.clone()));
        crate::detail::detail_route(user.id())
    }

    /// Reset search text, gender and page.
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.gender.set(&mut self.storage, String::new());
        self.set_page(1);
    }

    fn set_page(&mut self, page: u32) {
        if *self.page.get() != page {
            self.page.set(&mut self.storage, page);
        }
    }

    /// Start a fetch for the current filter state.
    ///
    /// Any fetch started earlier becomes stale.
    pub fn begin_fetch(&mut self) -> PendingFetch {
        let filter = self.filter();
        let params = fetch_params(&filter, &self.config);
        self.start(filter, params)
    }

    /// Start a fetch with the parameters of the last one, if any.
    pub fn begin_retry(&mut self) -> Option<PendingFetch> {
        let last = self.latest.clone()?;
        Some(self.start(last.filter, last.params))
    }

    fn start(&mut self, filter: FilterState, params: FetchParams) -> PendingFetch {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        tracing::debug!("Fetch #{ticket} ({:?}): {:?}", filter.mode(), params);
        self.latest = Some(Request {
            ticket,
            filter,
            params: params.clone(),
        });
        self.view.is_loading = true;
        PendingFetch { ticket, params }
    }

    /// Apply the result of fetch `ticket`, unless a newer one was started.
    pub fn complete_fetch(&mut self, ticket: u64, result: Result<Batch>) -> FetchOutcome {
        let request = match &self.latest {
            Some(latest) if latest.ticket == ticket => latest.clone(),
            _ => {
                tracing::warn!("Discarding stale response for fetch #{ticket}");
                return FetchOutcome::Stale;
            }
        };
        self.view.is_loading = false;

        match result {
            Ok(batch) => {
                self.store.merge(&batch);
                self.batch = Some(batch);
                self.shown = Some(request);
                self.view.error = None;
                self.rederive();
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::debug!("Fetch #{ticket} failed: {e}");
                self.view.error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    fn rederive(&mut self) {
        // the batch answers the request it was fetched for
        let (Some(batch), Some(shown)) = (&self.batch, &self.shown) else {
            return;
        };
        let (records, pagination) = visible(&shown.filter, batch, &self.config);
        self.view.records = records;
        self.view.pagination = pagination;
    }

    /// Fetch for the current filter state and apply the result.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let pending = self.begin_fetch();
        let result = self.source.fetch_users(&pending.params).await;
        self.complete_fetch(pending.ticket, result)
    }

    /// Bring the view in line with the filter state, fetching only when the
    /// request would differ from the one already shown.
    ///
    /// Paging through search results re-slices the pool without a request.
    pub async fn sync(&mut self) -> FetchOutcome {
        let filter = self.filter();
        let params = fetch_params(&filter, &self.config);
        let up_to_date = self.view.error.is_none()
            && self
                .shown
                .as_ref()
                .is_some_and(|s| s.params == params && s.filter.search_text == filter.search_text)
            && self
                .latest
                .as_ref()
                .zip(self.shown.as_ref())
                .is_some_and(|(l, s)| l.ticket == s.ticket);
        if up_to_date {
            if let Some(shown) = self.shown.as_mut() {
                shown.filter = filter;
            }
            self.rederive();
            return FetchOutcome::Applied;
        }
        self.refresh().await
    }

    /// Re-issue the last fetch unchanged. Does nothing if nothing was fetched yet.
    pub async fn retry(&mut self) -> Option<FetchOutcome> {
        let pending = self.begin_retry()?;
        let result = self.source.fetch_users(&pending.params).await;
        Some(self.complete_fetch(pending.ticket, result))
    }
}
