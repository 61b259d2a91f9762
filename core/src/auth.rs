//! Request authentication.
//!
//! An `Authenticator` sees the filtered headers, query params and body of
//! every request right before it is traced and sent, and may add or
//! overwrite entries in place.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::{self, API_TOKEN_ENV};

pub trait Authenticator: fmt::Debug + Send + Sync {
    fn authenticate(
        &self,
        headers: &mut BTreeMap<String, String>,
        params: &mut BTreeMap<String, String>,
        body: &mut Map<String, Value>,
    );
}

/// Leaves requests untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Authenticator for NoAuth {
    fn authenticate(
        &self,
        _headers: &mut BTreeMap<String, String>,
        _params: &mut BTreeMap<String, String>,
        _body: &mut Map<String, Value>,
    ) {
    }
}

/// Sends `Authorization: Bearer <token>` with every request.
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Reads the token from `PETSTORE_API_TOKEN`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(config::env_lookup)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        lookup(API_TOKEN_ENV)
            .filter(|token| !token.is_empty())
            .map(Self::new)
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth").field("token", &"<redacted>").finish()
    }
}

impl Authenticator for BearerAuth {
    fn authenticate(
        &self,
        headers: &mut BTreeMap<String, String>,
        _params: &mut BTreeMap<String, String>,
        _body: &mut Map<String, Value>,
    ) {
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.token));
    }
}

/// The authenticator `from_env` constructors use.
pub fn authenticator_from_env() -> Arc<dyn Authenticator> {
    match BearerAuth::from_env() {
        Some(auth) => Arc::new(auth),
        None => Arc::new(NoAuth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(auth: &dyn Authenticator) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::from([("Accept".to_string(), "*/*".to_string())]);
        let mut params = BTreeMap::new();
        let mut body = Map::new();
        auth.authenticate(&mut headers, &mut params, &mut body);
        assert!(params.is_empty());
        assert!(body.is_empty());
        headers
    }

    #[test]
    fn no_auth_is_a_no_op() {
        let headers = run(&NoAuth);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn bearer_adds_authorization() {
        let headers = run(&BearerAuth::new("s3cret"));
        assert_eq!(headers["Authorization"], "Bearer s3cret");
        assert_eq!(headers["Accept"], "*/*");
    }

    #[test]
    fn bearer_overwrites_existing_authorization() {
        let mut headers = BTreeMap::from([("Authorization".to_string(), "Basic abc".to_string())]);
        BearerAuth::new("t").authenticate(&mut headers, &mut BTreeMap::new(), &mut Map::new());
        assert_eq!(headers["Authorization"], "Bearer t");
    }

    #[test]
    fn bearer_debug_hides_token() {
        let rendered = format!("{:?}", BearerAuth::new("s3cret"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn bearer_from_lookup() {
        let auth = BearerAuth::from_lookup(|_| Some("tok".to_string())).unwrap();
        assert_eq!(run(&auth)["Authorization"], "Bearer tok");
        assert!(BearerAuth::from_lookup(|_| Some(String::new())).is_none());
        assert!(BearerAuth::from_lookup(|_| None).is_none());
    }
}
