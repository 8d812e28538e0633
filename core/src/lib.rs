//! Client core for a read-only pokemon catalog API.
//!
//! # Overview
//! Two pipelines share one design: `CatalogClient` fetches a bounded page of
//! the catalog, `DetailClient` fetches one record by id or name. Both build
//! the request, execute it through a `Transport`, validate the status, decode
//! the body and publish the outcome as a `FetchState`, the only thing a
//! presentation layer needs to observe.
//!
//! # Design
//! - `PokeApi` is the sans-IO half: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. Hosts that do their own I/O (see
//!   the FFI crate) use it directly.
//! - `decode` owns the API's JSON schema; the rest of the crate only sees
//!   `model` types.
//! - Every failure becomes `FetchState::Failure(message)`; nothing is raised
//!   to the observer.

pub mod api;
pub mod catalog;
pub mod config;
pub mod decode;
pub mod detail;
pub mod error;
pub mod http;
pub mod model;
pub mod state;
pub mod transport;

pub use api::PokeApi;
pub use catalog::{CatalogClient, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use config::ClientConfig;
pub use detail::DetailClient;
pub use error::{ApiError, Resource};
pub use http::{HttpRequest, HttpResponse};
pub use model::{CatalogEntry, CatalogItem, DetailRecord, Stat, TypeSlot};
pub use state::{FetchState, StatePublisher};
pub use transport::{ReqwestTransport, Transport};
