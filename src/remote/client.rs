//! HTTP client for randomuser.me compatible directory APIs.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Result, UserdexError};
use crate::types::{Batch, FetchMeta, User};

use super::{CollectionSource, FetchParams};

/// Connect timeout cap; the overall timeout comes from configuration.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope. The API reports some failures as a 200 with an
/// `error` field instead of results.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    results: Vec<User>,
    #[serde(default)]
    info: Option<FetchMeta>,
    #[serde(default)]
    error: Option<String>,
}

impl Envelope {
    fn into_batch(self) -> Result<Batch> {
        if let Some(message) = self.error {
            return Err(UserdexError::Api(message));
        }
        Ok(Batch {
            results: self.results,
            info: self.info,
        })
    }
}

/// Remote collection client backed by reqwest.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    client: Client,
    base_url: String,
}

impl RandomUserClient {
    /// Create a client from configuration.
    ///
    /// Uses the configured base URL (or `USERDEX_API_URL`) and the configured
    /// remote timeout as the overall request timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.remote_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(CONNECT_TIMEOUT))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url(),
        })
    }

    /// Create a client against an explicit base URL with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Config::default().remote_timeout())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_batch(&self, params: &FetchParams) -> Result<Batch> {
        let url = params.to_url(&self.base_url)?;
        tracing::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UserdexError::Api(format!("HTTP {status}")));
        }

        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body)?;
        envelope.into_batch()
    }
}

impl CollectionSource for RandomUserClient {
    fn fetch_users(
        &self,
        params: &FetchParams,
    ) -> impl std::future::Future<Output = Result<Batch>> + Send {
        self.get_batch(params)
    }
}
