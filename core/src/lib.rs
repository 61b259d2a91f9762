//! Blocking and async clients for the Petstore API.
//!
//! # Overview
//! Three operations (`list_pets`, `create_pet`, `get_pet_by_id`) over one
//! request pipeline: build the call, filter unset entries, apply session
//! headers and authentication, execute, trace, check the status, decode.
//!
//! # Design
//! - `PetsApi` builds requests; it holds only the base URL.
//! - `transport::prepare` and `transport::complete` are shared by both
//!   clients, so the only thing the clients differ in is the I/O backend
//!   (`ureq` for blocking, `reqwest` for async).
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   which keeps the pipeline testable with in-memory transports.
//! - All failures come back as `PetstoreError`.

pub mod api;
pub mod async_client;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod transport;
pub mod types;

pub use api::PetsApi;
pub use async_client::AsyncPetstoreClient;
pub use auth::{authenticator_from_env, Authenticator, BearerAuth, NoAuth};
pub use client::PetstoreClient;
pub use config::{ClientConfig, API_TOKEN_ENV, BASE_URL_ENV};
pub use error::PetstoreError;
pub use http::{ApiCall, HttpMethod, HttpRequest, HttpResponse, ResponseBody};
pub use logging::enable_debug_logging;
pub use transport::{AsyncTransport, ReqwestTransport, Session, Transport, UreqTransport, USER_AGENT};
pub use types::{ErrorModel, Pet, Pets};
