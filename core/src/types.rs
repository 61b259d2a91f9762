//! Records exchanged with the petstore API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! the integration tests catch drift between the two crates. `parse` is the
//! single entry point the clients use to turn decoded JSON into a record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PetstoreError;

/// A single pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// The list returned by `GET /pets`.
pub type Pets = Vec<Pet>;

/// Error payload the API documents for failed calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorModel {
    pub code: i32,
    pub message: String,
}

/// Parse a decoded JSON value into a record, naming it in the error.
pub fn parse<T: DeserializeOwned>(value: Value, model: &'static str) -> Result<T, PetstoreError> {
    serde_json::from_value(value).map_err(|source| PetstoreError::Validation { model, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pet_without_tag() {
        let pet: Pet = parse(json!({"id": 1, "name": "Fido"}), "Pet").unwrap();
        assert_eq!(
            pet,
            Pet {
                id: 1,
                name: "Fido".to_string(),
                tag: None
            }
        );
        assert_eq!(serde_json::to_value(&pet).unwrap(), json!({"id": 1, "name": "Fido"}));
    }

    #[test]
    fn pets_list() {
        let pets: Pets = parse(
            json!([{"id": 1, "name": "Fido", "tag": "dog"}, {"id": 2, "name": "Tom"}]),
            "Pets",
        )
        .unwrap();
        assert_eq!(pets.len(), 2);
        assert_eq!(pets[0].tag.as_deref(), Some("dog"));
    }

    #[test]
    fn missing_name_is_validation_error() {
        let err = parse::<Pet>(json!({"id": 1}), "Pet").unwrap_err();
        assert!(matches!(err, PetstoreError::Validation { model: "Pet", .. }));
    }

    #[test]
    fn object_where_list_expected() {
        let err = parse::<Pets>(json!({"id": 1, "name": "Fido"}), "Pets").unwrap_err();
        assert!(matches!(err, PetstoreError::Validation { model: "Pets", .. }));
    }
}
