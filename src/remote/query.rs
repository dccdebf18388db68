//! Request parameters for the directory API and their URL encoding.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, UserdexError};
use crate::types::{ApiFormat, Field, Gender, MAX_RESULTS, Nationality};

/// Parameters for one bulk fetch. Every field is optional; unset fields are
/// left out of the query entirely rather than sent as empty or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchParams {
    /// Requested batch size, clamped to 1..=5000 when encoded
    pub results: Option<u32>,
    pub gender: Option<Gender>,
    /// Password charset spec, e.g. "upper,lower,1-16"
    pub password: Option<String>,
    pub seed: Option<String>,
    pub format: Option<ApiFormat>,
    /// Version pin, e.g. "1.4"; becomes a path segment
    pub version: Option<String>,
    pub nat: Vec<Nationality>,
    /// 1-based page index
    pub page: Option<u32>,
    pub inc: Vec<Field>,
    pub exc: Vec<Field>,
    pub noinfo: bool,
}

impl FetchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }

    pub fn gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn format(mut self, format: ApiFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn nat(mut self, nat: Vec<Nationality>) -> Self {
        self.nat = nat;
        self
    }

    pub fn include(mut self, fields: Vec<Field>) -> Self {
        self.inc = fields;
        self
    }

    pub fn exclude(mut self, fields: Vec<Field>) -> Self {
        self.exc = fields;
        self
    }

    pub fn noinfo(mut self, noinfo: bool) -> Self {
        self.noinfo = noinfo;
        self
    }

    /// Fail fast on response formats we cannot decode.
    pub fn validate(&self) -> Result<()> {
        match self.format {
            Some(format) if !format.is_json() => Err(UserdexError::UnsupportedFormat(format)),
            _ => Ok(()),
        }
    }

    /// Query pairs in wire order. A `None` value is a bare flag.
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        let mut pairs = Vec::new();

        if let Some(results) = self.results {
            pairs.push(("results", Some(results.clamp(1, MAX_RESULTS).to_string())));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender", Some(gender.to_string())));
        }
        if let Some(password) = self.password.as_ref().filter(|p| !p.is_empty()) {
            pairs.push(("password", Some(password.clone())));
        }
        if let Some(seed) = self.seed.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("seed", Some(seed.clone())));
        }
        if let Some(format) = self.format {
            pairs.push(("format", Some(format.to_string())));
        }
        if let Some(version) = self.version.as_ref().filter(|v| !v.is_empty()) {
            pairs.push(("version", Some(version.clone())));
        }
        if !self.nat.is_empty() {
            pairs.push(("nat", Some(join(&self.nat))));
        }
        if let Some(page) = self.page {
            pairs.push(("page", Some(page.to_string())));
        }
        if !self.inc.is_empty() {
            pairs.push(("inc", Some(join(&self.inc))));
        }
        if !self.exc.is_empty() {
            pairs.push(("exc", Some(join(&self.exc))));
        }
        if self.noinfo {
            pairs.push(("noinfo", None));
        }

        pairs
    }

    /// Build the request URL: `<base>[/<version>]/?<query>`.
    ///
    /// Validates the format first, so an unsupported format never produces a URL.
    pub fn to_url(&self, base: &str) -> Result<Url> {
        self.validate()?;

        let mut path = base.trim_end_matches('/').to_string();
        if let Some(version) = self.version.as_ref().filter(|v| !v.is_empty()) {
            path.push('/');
            path.push_str(version.trim_matches('/'));
        }
        path.push('/');

        let mut url =
            Url::parse(&path).map_err(|e| UserdexError::InvalidUrl(path.clone(), e.to_string()))?;

        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                match value {
                    Some(value) => query.append_pair(key, value),
                    None => query.append_key_only(key),
                };
            }
        }

        Ok(url)
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
