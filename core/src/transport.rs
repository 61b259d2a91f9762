//! The request execution core shared by both clients.
//!
//! # Design
//! A call goes through three steps: `prepare` turns an `ApiCall` into a
//! filtered, authenticated `HttpRequest`; a backend executes it; `complete`
//! applies the status and decode rules to the `HttpResponse`. Only the middle
//! step differs between the blocking client (`Transport`, backed by ureq) and
//! the async client (`AsyncTransport`, backed by reqwest), so both clients
//! observe the same requests and the same errors.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::auth::Authenticator;
use crate::error::PetstoreError;
use crate::http::{filter_none, filter_null, ApiCall, HttpMethod, HttpRequest, HttpResponse, ResponseBody};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("petstore/rust/", env!("CARGO_PKG_VERSION"));

/// Default headers a client applies to every request it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    default_headers: BTreeMap<String, String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            default_headers: BTreeMap::from([
                ("Content-Type".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
            ]),
        }
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }
}

/// Insert a header, replacing any entry whose name differs only in case.
fn merge_header(headers: &mut BTreeMap<String, String>, name: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

/// Filter the call's maps, merge them over the session defaults and let the
/// authenticator adjust the result.
pub fn prepare(call: &ApiCall, session: &Session, authenticator: &dyn Authenticator) -> HttpRequest {
    let mut headers = session.default_headers().clone();
    for (name, value) in filter_none(&call.headers) {
        merge_header(&mut headers, name, value);
    }
    let mut params = filter_none(&call.params);
    let mut body = filter_null(&call.body);
    authenticator.authenticate(&mut headers, &mut params, &mut body);
    HttpRequest {
        method: call.method,
        url: call.url.clone(),
        headers,
        params,
        body,
    }
}

/// Map a response to the call's result.
///
/// Any status of 400 or above fails with `HttpStatus`. Otherwise the body is
/// parsed when `decode` is set, and ignored when it is not.
pub fn complete(request: &HttpRequest, response: HttpResponse, decode: bool) -> Result<Option<Value>, PetstoreError> {
    if response.is_error() {
        return Err(PetstoreError::HttpStatus {
            method: request.method,
            url: request.url.clone(),
            status: response.status,
            body: ResponseBody::from_text(&response.body),
            headers: response.headers,
        });
    }
    if !decode {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|source| PetstoreError::Decode {
            method: request.method,
            url: request.url.clone(),
            source,
        })
}

/// Executes a request on the calling thread.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, PetstoreError>;
}

/// Executes a request without blocking other tasks.
///
/// Dropping the returned future aborts the request where the backend allows.
pub trait AsyncTransport: Send + Sync {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, PetstoreError>> + Send;
}

/// Blocking backend on a ureq agent.
///
/// Status codes are returned as data so `complete` alone interprets them.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

/// Response bytes as text. Invalid UTF-8 becomes U+FFFD in both backends.
fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &BTreeMap<String, String>) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, PetstoreError> {
        let url = request.full_url()?;
        let body = request.json_body().unwrap_or_default();
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url.as_str()), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url.as_str()), &request.headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url.as_str()), &request.headers).send(body.as_bytes()),
            HttpMethod::Put => with_headers(self.agent.put(url.as_str()), &request.headers).send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| PetstoreError::transport(request, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| PetstoreError::transport(request, e))?;
        let body = body_text(&bytes);

        Ok(HttpResponse { status, headers, body })
    }
}

/// Async backend on a reqwest client, which owns the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, PetstoreError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| PetstoreError::Configuration(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }

    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl AsyncTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, PetstoreError> {
        let url = request.full_url()?;
        let mut builder = self.client.request(request.method.into(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.json_body() {
            builder = builder.body(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| PetstoreError::transport(request, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PetstoreError::transport(request, e))?;
        let body = body_text(&bytes);

        Ok(HttpResponse { status, headers, body })
    }
}
