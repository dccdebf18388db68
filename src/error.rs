use thiserror::Error;

use crate::types::ApiFormat;

#[derive(Error, Debug)]
pub enum UserdexError {
    #[error("user '{0}' not found, return to the listing and open it from there")]
    RecordNotFound(String),

    #[error("format '{0}' is not supported, only JSON responses can be decoded")]
    UnsupportedFormat(ApiFormat),

    #[error("invalid gender '{0}', expected 'male' or 'female'")]
    InvalidGender(String),

    #[error("invalid nationality '{0}'")]
    InvalidNationality(String),

    #[error("invalid field '{0}'")]
    InvalidField(String),

    #[error("invalid format '{0}'")]
    InvalidFormat(String),

    #[error("invalid page '{0}': pages start at 1")]
    InvalidPage(String),

    #[error("invalid API URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl UserdexError {
    /// Whether this error came from talking to (or preparing a request for) the remote API.
    ///
    /// Fetch failures are shown as a retryable error state; nothing retries them automatically.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            UserdexError::Http(_)
                | UserdexError::Api(_)
                | UserdexError::Json(_)
                | UserdexError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, UserdexError>;
