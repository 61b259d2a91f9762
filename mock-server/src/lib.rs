use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Largest page `GET /pets` returns.
pub const MAX_LIMIT: i64 = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorModel {
    pub code: i32,
    pub message: String,
}

#[derive(Deserialize, Default)]
pub struct CreatePet {
    pub name: Option<String>,
    pub tag: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Default)]
pub struct Store {
    pets: BTreeMap<i64, Pet>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<ErrorModel>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorModel {
            code: i32::from(status.as_u16()),
            message: message.to_string(),
        }),
    )
}

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose store starts with `pets`; new ids continue after the largest.
pub fn app_with(pets: Vec<Pet>) -> Router {
    let next_id = pets.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let store = Store {
        pets: pets.into_iter().map(|p| (p.id, p)).collect(),
        next_id,
    };
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{id}", get(show_pet_by_id))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, pets: Vec<Pet>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(pets)).await
}

async fn list_pets(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Pet>>, ApiError> {
    let limit = params.limit.unwrap_or(MAX_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(api_error(StatusCode::BAD_REQUEST, "limit must be between 1 and 100"));
    }
    let store = db.read().await;
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    Ok(Json(store.pets.values().take(take).cloned().collect()))
}

async fn create_pet(State(db): State<Db>, Json(input): Json<CreatePet>) -> StatusCode {
    let mut store = db.write().await;
    let id = store.next_id;
    store.next_id += 1;
    let pet = Pet {
        id,
        name: input.name.unwrap_or_else(|| format!("pet-{id}")),
        tag: input.tag,
    };
    tracing::debug!(id, name = %pet.name, "created pet");
    store.pets.insert(id, pet);
    StatusCode::CREATED
}

async fn show_pet_by_id(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Pet>, ApiError> {
    let store = db.read().await;
    store
        .pets
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_serializes_without_missing_tag() {
        let pet = Pet {
            id: 1,
            name: "Fido".to_string(),
            tag: None,
        };
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Fido"}));
    }

    #[test]
    fn create_pet_accepts_empty_object() {
        let input: CreatePet = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_none());
        assert!(input.tag.is_none());
    }

    #[test]
    fn create_pet_accepts_name_and_tag() {
        let input: CreatePet = serde_json::from_str(r#"{"name":"Rex","tag":"dog"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Rex"));
        assert_eq!(input.tag.as_deref(), Some("dog"));
    }

    #[test]
    fn api_error_uses_status_as_code() {
        let (status, Json(body)) = api_error(StatusCode::NOT_FOUND, "not found");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, 404);
        assert_eq!(body.message, "not found");
    }
}
