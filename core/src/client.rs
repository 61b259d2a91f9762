//! Blocking petstore client.
//!
//! # Design
//! `PetstoreClient` pairs a `PetsApi` request builder with a session, an
//! authenticator and a `Transport`. Every operation builds its `ApiCall`,
//! hands it to `send`, and parses what comes back; `send` is the only place
//! a request is executed.

use std::sync::Arc;

use serde_json::Value;

use crate::api::PetsApi;
use crate::auth::{authenticator_from_env, Authenticator};
use crate::config::ClientConfig;
use crate::error::PetstoreError;
use crate::http::ApiCall;
use crate::logging;
use crate::transport::{self, Session, Transport, UreqTransport};
use crate::types::{self, Pet, Pets};

/// Petstore client whose calls block the calling thread.
#[derive(Debug)]
pub struct PetstoreClient<T = UreqTransport> {
    api: PetsApi,
    session: Session,
    authenticator: Arc<dyn Authenticator>,
    transport: T,
}

impl PetstoreClient {
    pub fn new(base_url: &str, authenticator: Arc<dyn Authenticator>) -> Result<Self, PetstoreError> {
        let config = ClientConfig::new(base_url)?;
        Ok(Self::with_transport(&config, authenticator, UreqTransport::new()))
    }

    /// Reads `PETSTORE_BASE_URL` (required) and `PETSTORE_API_TOKEN`.
    pub fn from_env() -> Result<Self, PetstoreError> {
        let config = ClientConfig::from_env()?;
        Ok(Self::with_transport(&config, authenticator_from_env(), UreqTransport::new()))
    }
}

impl<T: Transport> PetstoreClient<T> {
    pub fn with_transport(config: &ClientConfig, authenticator: Arc<dyn Authenticator>, transport: T) -> Self {
        Self {
            api: PetsApi::new(config),
            session: Session::new(),
            authenticator,
            transport,
        }
    }

    pub fn api(&self) -> &PetsApi {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute one call. Returns the decoded body when `call.decode` is set.
    pub fn send(&self, call: &ApiCall) -> Result<Option<Value>, PetstoreError> {
        let request = transport::prepare(call, &self.session, self.authenticator.as_ref());
        let debug = logging::debug_enabled();
        if debug {
            logging::trace_request(&request);
        }
        let response = self.transport.execute(&request)?;
        if debug {
            logging::trace_response(&response);
        }
        transport::complete(&request, response, call.decode)
    }

    /// List all pets
    pub fn list_pets(&self, limit: Option<i64>) -> Result<Pets, PetstoreError> {
        let data = self.send(&self.api.build_list_pets(limit))?;
        types::parse(data.unwrap_or_default(), "Pets")
    }

    /// Create a pet
    pub fn create_pet(&self) -> Result<(), PetstoreError> {
        self.send(&self.api.build_create_pet())?;
        Ok(())
    }

    /// Info for a specific pet
    pub fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, PetstoreError> {
        let data = self.send(&self.api.build_get_pet_by_id(pet_id))?;
        types::parse(data.unwrap_or_default(), "Pet")
    }
}
