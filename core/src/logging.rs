//! Debug tracing of requests and responses.
//!
//! Records are emitted on the `petstore` target as one JSON object per
//! message. Callers check `debug_enabled` once per call; when it is false
//! nothing is serialized.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::http::{HttpRequest, HttpResponse, ResponseBody};

pub const LOG_TARGET: &str = "petstore";

/// Installs a global stderr subscriber with `petstore=debug`.
///
/// Returns `false` when another global subscriber is already installed; in
/// that case its own filter decides whether debug records are shown.
pub fn enable_debug_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("{LOG_TARGET}=debug")))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

pub fn debug_enabled() -> bool {
    tracing::enabled!(target: LOG_TARGET, Level::DEBUG)
}

/// Headers whose values never reach the log.
const REDACTED_HEADERS: &[&str] = &["authorization", "proxy-authorization"];

pub fn request_record(request: &HttpRequest) -> Value {
    let headers: BTreeMap<&str, &str> = request
        .headers
        .iter()
        .map(|(name, value)| {
            let redacted = REDACTED_HEADERS
                .iter()
                .any(|h| name.eq_ignore_ascii_case(h));
            (name.as_str(), if redacted { "<redacted>" } else { value.as_str() })
        })
        .collect();
    json!({
        "method": request.method.as_str(),
        "url": request.url,
        "headers": headers,
        "params": request.params,
        "json": request.body,
    })
}

pub fn response_record(response: &HttpResponse) -> Value {
    let mut record = json!({
        "status_code": response.status,
        "headers": response.headers,
    });
    match ResponseBody::from_text(&response.body) {
        ResponseBody::Json(value) => record["json"] = value,
        ResponseBody::Text(text) => record["body"] = Value::String(text),
    }
    record
}

pub(crate) fn trace_request(request: &HttpRequest) {
    tracing::debug!(target: LOG_TARGET, "{}", request_record(request));
}

pub(crate) fn trace_response(response: &HttpResponse) {
    tracing::debug!(target: LOG_TARGET, "{}", response_record(response));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[test]
    fn request_record_fields() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:3000/pets".to_string(),
            headers: BTreeMap::from([("User-Agent".to_string(), "ua".to_string())]),
            params: BTreeMap::from([("limit".to_string(), "5".to_string())]),
            body: serde_json::Map::new(),
        };
        assert_eq!(
            request_record(&request),
            json!({
                "method": "GET",
                "url": "http://localhost:3000/pets",
                "headers": {"User-Agent": "ua"},
                "params": {"limit": "5"},
                "json": {},
            })
        );
    }

    #[test]
    fn request_record_redacts_credentials() {
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: "http://localhost:3000/pets".to_string(),
            headers: BTreeMap::from([("Authorization".to_string(), "Bearer s3cret".to_string())]),
            params: BTreeMap::new(),
            body: serde_json::Map::new(),
        };
        let record = request_record(&request);
        assert_eq!(record["headers"]["Authorization"], "<redacted>");
        assert!(!record.to_string().contains("s3cret"));
    }

    #[test]
    fn response_record_with_json_body() {
        let response = HttpResponse {
            status: 200,
            headers: BTreeMap::new(),
            body: r#"{"id":1}"#.to_string(),
        };
        let record = response_record(&response);
        assert_eq!(record["status_code"], 200);
        assert_eq!(record["json"], json!({"id": 1}));
        assert!(record.get("body").is_none());
    }

    #[test]
    fn response_record_falls_back_to_text() {
        let response = HttpResponse {
            status: 502,
            headers: BTreeMap::from([("content-type".to_string(), "text/html".to_string())]),
            body: "<h1>Bad Gateway</h1>".to_string(),
        };
        let record = response_record(&response);
        assert_eq!(record["body"], "<h1>Bad Gateway</h1>");
        assert_eq!(record["headers"]["content-type"], "text/html");
        assert!(record.get("json").is_none());
    }
}
