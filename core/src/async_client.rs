//! Async petstore client.
//!
//! Same operations, request building and error rules as `PetstoreClient`;
//! calls suspend the calling task instead of blocking the thread. The
//! transport (for reqwest, the connection pool) is owned by the client and
//! released when the client is closed or dropped, whichever comes first.

use std::sync::Arc;

use serde_json::Value;

use crate::api::PetsApi;
use crate::auth::{authenticator_from_env, Authenticator};
use crate::config::ClientConfig;
use crate::error::PetstoreError;
use crate::http::ApiCall;
use crate::logging::{self, LOG_TARGET};
use crate::transport::{self, AsyncTransport, ReqwestTransport, Session};
use crate::types::{self, Pet, Pets};

/// Petstore client whose calls can be awaited concurrently.
///
/// Overlapping calls on one client share the transport's connection pool.
#[derive(Debug)]
pub struct AsyncPetstoreClient<T = ReqwestTransport> {
    api: PetsApi,
    session: Session,
    authenticator: Arc<dyn Authenticator>,
    transport: T,
}

impl AsyncPetstoreClient {
    pub fn new(base_url: &str, authenticator: Arc<dyn Authenticator>) -> Result<Self, PetstoreError> {
        let config = ClientConfig::new(base_url)?;
        Ok(Self::with_transport(&config, authenticator, ReqwestTransport::new()?))
    }

    /// Reads `PETSTORE_BASE_URL` (required) and `PETSTORE_API_TOKEN`.
    pub fn from_env() -> Result<Self, PetstoreError> {
        let config = ClientConfig::from_env()?;
        Ok(Self::with_transport(&config, authenticator_from_env(), ReqwestTransport::new()?))
    }
}

impl<T: AsyncTransport> AsyncPetstoreClient<T> {
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
    pub async fn send(&self, call: &ApiCall) -> Result<Option<Value>, PetstoreError> {
        let request = transport::prepare(call, &self.session, self.authenticator.as_ref());
        let debug = logging::debug_enabled();
        if debug {
            logging::trace_request(&request);
        }
        let response = self.transport.execute(&request).await?;
        if debug {
            logging::trace_response(&response);
        }
        transport::complete(&request, response, call.decode)
    }

    /// List all pets
    pub async fn list_pets(&self, limit: Option<i64>) -> Result<Pets, PetstoreError> {
        let data = self.send(&self.api.build_list_pets(limit)).await?;
        types::parse(data.unwrap_or_default(), "Pets")
    }

    /// Create a pet
    pub async fn create_pet(&self) -> Result<(), PetstoreError> {
        self.send(&self.api.build_create_pet()).await?;
        Ok(())
    }

    /// Info for a specific pet
    pub async fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, PetstoreError> {
        let data = self.send(&self.api.build_get_pet_by_id(pet_id)).await?;
        types::parse(data.unwrap_or_default(), "Pet")
    }

    /// Release the transport now instead of at the end of the owner's scope.
    pub fn close(self) {
        tracing::debug!(target: LOG_TARGET, base_url = self.api.base_url(), "closing client");
        drop(self);
    }
}
