//! Catalog list retrieval.

use tokio::sync::watch;
use tracing::debug;

use crate::api::PokeApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::CatalogItem;
use crate::state::{FetchState, StatePublisher};
use crate::transport::{ReqwestTransport, Transport};

pub const DEFAULT_LIMIT: u32 = 1000;
pub const DEFAULT_OFFSET: u32 = 0;

/// Fetches one bounded page of the catalog and publishes it as a
/// `FetchState<Vec<CatalogItem>>`.
///
/// Failed fetches are not retried; call `fetch_catalog` (or `refresh`)
/// again.
#[derive(Debug)]
pub struct CatalogClient<T = ReqwestTransport> {
    api: PokeApi,
    transport: T,
    state: StatePublisher<Vec<CatalogItem>>,
}

impl CatalogClient<ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> CatalogClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            api: PokeApi::new(&config.base_url),
            transport,
            state: StatePublisher::new("catalog"),
        }
    }

    /// Publish `Loading`, request `limit` entries starting at `offset`, and
    /// publish the outcome. An empty page is a success.
    pub async fn fetch_catalog(&self, limit: u32, offset: u32) {
        self.state.track(self.load(limit, offset)).await;
    }

    /// `fetch_catalog` with the default page.
    pub async fn refresh(&self) {
        self.fetch_catalog(DEFAULT_LIMIT, DEFAULT_OFFSET).await;
    }

    async fn load(&self, limit: u32, offset: u32) -> Result<Vec<CatalogItem>, ApiError> {
        let request = self.api.build_catalog(limit, offset)?;
        debug!(url = %request.url, "fetching catalog");
        let response = self.transport.execute(request).await?;
        let items = self.api.parse_catalog(response)?;
        debug!(count = items.len(), "catalog decoded");
        Ok(items)
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<Vec<CatalogItem>>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FetchState<Vec<CatalogItem>> {
        self.state.current()
    }

    /// Items of the last successful fetch; empty in every other state.
    pub fn items(&self) -> Vec<CatalogItem> {
        self.state.current().payload().cloned().unwrap_or_default()
    }
}
