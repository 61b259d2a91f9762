//! Client configuration.

use url::Url;

use crate::error::PetstoreError;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "PETSTORE_BASE_URL";

/// Environment variable holding an optional bearer token.
pub const API_TOKEN_ENV: &str = "PETSTORE_API_TOKEN";

/// Settings shared by both clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Validates `base_url` as an absolute http(s) URL and strips any
    /// trailing slash.
    pub fn new(base_url: &str) -> Result<Self, PetstoreError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            PetstoreError::Configuration(format!("invalid base url {base_url:?}: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PetstoreError::Configuration(format!(
                "base url {base_url:?} must use http or https"
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Reads the base URL from `PETSTORE_BASE_URL`.
    pub fn from_env() -> Result<Self, PetstoreError> {
        Self::from_lookup(env_lookup)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PetstoreError> {
        let url = lookup(BASE_URL_ENV)
            .ok_or_else(|| PetstoreError::Configuration(format!("{BASE_URL_ENV} is not set")))?;
        Self::new(&url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub(crate) fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
