pub mod cli;
pub mod commands;
pub mod config;
pub mod detail;
pub mod display;
pub mod error;
pub mod listing;
pub mod macros;
pub mod paths;
pub mod remote;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_guards;

pub use config::Config;
pub use detail::{DetailOutcome, parse_detail_route, resolve_by_id};
pub use error::{Result, UserdexError};
pub use listing::{
    Debouncer, FetchOutcome, FilterState, ListingConfig, ListingController, ListingView, Mode,
    PaginationMeta, fetch_params,
};
pub use remote::{CollectionSource, FetchParams, RandomUserClient, fetch_by_seed};
pub use state::{FileStore, KeyValueStore, MemoryStore, Persisted};
pub use store::UserStore;
pub use types::{ApiFormat, Batch, FetchMeta, Field, Gender, Nationality, User};
