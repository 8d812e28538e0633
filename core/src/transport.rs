//! The seam between the clients and the network.

use std::future::Future;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes an `HttpRequest` and hands back whatever the server answered.
///
/// Non-2xx statuses are returned as responses; only failures to obtain a
/// response at all become `ApiError::Transport`.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// `Transport` backed by a shared `reqwest::Client`.
///
/// Timeouts and connection pooling are whatever the client was built with;
/// `new()` uses reqwest's defaults.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.http.get(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
