//! Error types for the petstore client.
//!
//! # Design
//! Every operation on both clients fails through `PetstoreError`. Variants
//! separate where the failure happened: configuration, the network, the
//! server's status code, the response body, or the record shape. Status
//! failures keep the whole response (code, headers, body) since callers
//! usually need the server's error payload.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, ResponseBody};
use crate::types::ErrorModel;

/// Errors returned by `PetstoreClient` and `AsyncPetstoreClient`.
#[derive(Debug, Error)]
pub enum PetstoreError {
    /// A required configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request could not be completed at the network layer.
    #[error("{method} {url}: transport error: {message}")]
    Transport {
        method: HttpMethod,
        url: String,
        message: String,
    },

    /// The server answered with a status code of 400 or above.
    #[error("{method} {url}: HTTP {status}: {body}")]
    HttpStatus {
        method: HttpMethod,
        url: String,
        status: u16,
        headers: BTreeMap<String, String>,
        body: ResponseBody,
    },

    /// A success response carried a body that is not JSON.
    #[error("{method} {url}: response body is not valid JSON: {source}")]
    Decode {
        method: HttpMethod,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON payload does not match the expected record.
    #[error("response does not match {model}: {source}")]
    Validation {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl PetstoreError {
    pub(crate) fn transport(request: &HttpRequest, err: impl std::fmt::Display) -> Self {
        PetstoreError::Transport {
            method: request.method,
            url: request.url.clone(),
            message: err.to_string(),
        }
    }

    /// HTTP status code, for `HttpStatus` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            PetstoreError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The server's error payload, when a status failure carried one.
    pub fn error_model(&self) -> Option<ErrorModel> {
        match self {
            PetstoreError::HttpStatus { body, .. } => {
                serde_json::from_value(body.as_json()?.clone()).ok()
            }
            _ => None,
        }
    }
}
