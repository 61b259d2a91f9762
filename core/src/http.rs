//! HTTP descriptors for the petstore pipeline.
//!
//! # Design
//! Requests and responses are plain data. Operation methods assemble an
//! `ApiCall` whose maps may still hold unset (`None` / JSON `null`) entries;
//! the transport core filters those out into an `HttpRequest`, and a backend
//! turns the `HttpRequest` into an `HttpResponse`. Keeping both ends as data
//! lets the blocking and async clients share every step except the I/O.
//!
//! Maps are `BTreeMap`s so descriptors compare and log deterministically.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use url::Url;

use crate::error::PetstoreError;

/// Header or query map as assembled by an operation; `None` means "not set".
pub type RawParams = BTreeMap<String, Option<String>>;

/// JSON body as assembled by an operation; `null` values mean "not set".
pub type RawBody = Map<String, Value>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the JSON body is put on the wire for this method.
    pub fn sends_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One API call before filtering, session defaults and authentication.
///
/// Built by `PetsApi::build_*`; consumed by the clients' `send`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: HttpMethod,
    pub url: String,
    pub headers: RawParams,
    pub params: RawParams,
    pub body: RawBody,
    /// Parse the response body as JSON and hand it back.
    pub decode: bool,
}

impl ApiCall {
    pub fn new(method: HttpMethod, url: String, decode: bool) -> Self {
        Self {
            method,
            url,
            headers: RawParams::new(),
            params: RawParams::new(),
            body: RawBody::new(),
            decode,
        }
    }
}

/// An HTTP request described as plain data, with every unset entry removed.
///
/// Produced by `transport::prepare`. The backend executes it and returns the
/// corresponding `HttpResponse`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub params: BTreeMap<String, String>,
    pub body: Map<String, Value>,
}

impl HttpRequest {
    /// The request URL with `params` appended as a query string.
    pub fn full_url(&self) -> Result<String, PetstoreError> {
        if self.params.is_empty() {
            return Ok(self.url.clone());
        }
        let mut url = Url::parse(&self.url).map_err(|e| {
            PetstoreError::Configuration(format!("invalid request url {}: {e}", self.url))
        })?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    /// Serialized JSON body, for methods that transmit one.
    pub fn json_body(&self) -> Option<String> {
        self.method
            .sends_body()
            .then(|| Value::Object(self.body.clone()).to_string())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// A response body, parsed as JSON when possible and kept as text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_text(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_owned()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{value}"),
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

/// Drop every `None` entry, keeping the others unchanged.
pub fn filter_none<V: Clone>(map: &BTreeMap<String, Option<V>>) -> BTreeMap<String, V> {
    map.iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key.clone(), v)))
        .collect()
}

/// Drop every top-level `null` entry of a JSON object.
pub fn filter_null(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
