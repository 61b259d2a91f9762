//! Stateless request builder for the petstore operations.
//!
//! # Design
//! `PetsApi` holds only the base URL. Each operation has a `build_*` method
//! producing the `ApiCall` both clients send, so the blocking and async
//! clients cannot disagree about paths, params or decode flags.

use crate::config::ClientConfig;
use crate::http::{ApiCall, HttpMethod};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetsApi {
    base_url: String,
}

impl PetsApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /pets`, with `limit` only when given.
    pub fn build_list_pets(&self, limit: Option<i64>) -> ApiCall {
        let mut call = ApiCall::new(HttpMethod::Get, format!("{}/pets", self.base_url), true);
        call.params.insert("limit".to_string(), limit.map(|l| l.to_string()));
        call
    }

    /// `POST /pets` with an empty body. The response body is not decoded.
    pub fn build_create_pet(&self) -> ApiCall {
        ApiCall::new(HttpMethod::Post, format!("{}/pets", self.base_url), false)
    }

    /// `GET /pets/{id}`. The id is not range-checked.
    pub fn build_get_pet_by_id(&self, pet_id: i64) -> ApiCall {
        ApiCall::new(HttpMethod::Get, format!("{}/pets/{pet_id}", self.base_url), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> PetsApi {
        PetsApi::new(&ClientConfig::new("http://localhost:3000").unwrap())
    }

    #[test]
    fn build_list_pets_without_limit() {
        let call = api().build_list_pets(None);
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.url, "http://localhost:3000/pets");
        assert_eq!(call.params.get("limit"), Some(&None));
        assert!(call.decode);
        assert!(call.body.is_empty());
    }

    #[test]
    fn build_list_pets_with_limit() {
        let call = api().build_list_pets(Some(5));
        assert_eq!(call.params.get("limit"), Some(&Some("5".to_string())));
    }

    #[test]
    fn build_create_pet() {
        let call = api().build_create_pet();
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.url, "http://localhost:3000/pets");
        assert!(!call.decode);
        assert!(call.headers.is_empty());
        assert!(call.params.is_empty());
        assert!(call.body.is_empty());
    }

    #[test]
    fn build_get_pet_by_id() {
        let call = api().build_get_pet_by_id(42);
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.url, "http://localhost:3000/pets/42");
        assert!(call.decode);
    }

    #[test]
    fn get_pet_by_id_passes_non_positive_ids() {
        assert_eq!(api().build_get_pet_by_id(0).url, "http://localhost:3000/pets/0");
        assert_eq!(api().build_get_pet_by_id(-3).url, "http://localhost:3000/pets/-3");
    }
}
