//! Remote collection access.
//!
//! The directory API only offers offset/page based bulk fetch; there is no
//! lookup by identifier. Everything above this module talks to it through the
//! [`CollectionSource`] trait so the reconciler can be driven by mocks.

mod client;
mod query;

pub use client::RandomUserClient;
pub use query::FetchParams;

use crate::error::Result;
use crate::types::Batch;

/// A source of user batches.
pub trait CollectionSource {
    /// Fetch one batch for the given parameters.
    fn fetch_users(
        &self,
        params: &FetchParams,
    ) -> impl std::future::Future<Output = Result<Batch>> + Send;
}

impl<S: CollectionSource + ?Sized> CollectionSource for &S {
    fn fetch_users(
        &self,
        params: &FetchParams,
    ) -> impl std::future::Future<Output = Result<Batch>> + Send {
        (**self).fetch_users(params)
    }
}

/// Parameters for a seed lookup of `id`.
///
/// The API's `seed` makes generation reproducible, but a record's identifier
/// is not its seed: the record returned is NOT the one originally seen under
/// that id. Never use this to resolve a record for display.
pub fn fetch_by_seed(id: &str, params: FetchParams) -> FetchParams {
    FetchParams {
        seed: Some(id.to_string()),
        results: Some(1),
        ..params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, Nationality};

    #[test]
    fn test_fetch_by_seed_overrides_seed_and_results() {
        let base = FetchParams::new()
            .results(12)
            .page(4)
            .gender(Some(Gender::Male))
            .nat(vec![Nationality::Nz]);
        let params = fetch_by_seed("abc-123", base);

        assert_eq!(params.seed.as_deref(), Some("abc-123"));
        assert_eq!(params.results, Some(1));
        assert_eq!(params.page, Some(4));
        assert_eq!(params.gender, Some(Gender::Male));
        assert_eq!(params.nat, vec![Nationality::Nz]);
    }

    #[test]
    fn test_fetch_by_seed_query() {
        let params = fetch_by_seed("xyz", FetchParams::new());
        let url = params.to_url("https://randomuser.me/api").unwrap();
        assert_eq!(url.query(), Some("results=1&seed=xyz"));
    }
}
