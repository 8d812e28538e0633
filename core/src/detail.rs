//! Per-record retrieval.

use tokio::sync::watch;
use tracing::debug;

use crate::api::PokeApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::DetailRecord;
use crate::state::{FetchState, StatePublisher};
use crate::transport::{ReqwestTransport, Transport};

/// Fetches a single record by id or name and publishes it as a
/// `FetchState<DetailRecord>`.
///
/// A failed fetch clears any record from an earlier success.
#[derive(Debug)]
pub struct DetailClient<T = ReqwestTransport> {
    api: PokeApi,
    transport: T,
    state: StatePublisher<DetailRecord>,
}

impl DetailClient<ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> DetailClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            api: PokeApi::new(&config.base_url),
            transport,
            state: StatePublisher::new("detail"),
        }
    }

    /// `identifier` is a numeric id or a name in any case.
    pub async fn fetch_detail(&self, identifier: &str) {
        self.state.track(self.load(identifier)).await;
    }

    async fn load(&self, identifier: &str) -> Result<DetailRecord, ApiError> {
        let request = self.api.build_detail(identifier)?;
        debug!(identifier, url = %request.url, "fetching detail");
        let response = self.transport.execute(request).await?;
        self.api.parse_detail(response)
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<DetailRecord>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FetchState<DetailRecord> {
        self.state.current()
    }

    pub fn record(&self) -> Option<DetailRecord> {
        self.state.current().payload().cloned()
    }
}
