//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `PokeApi` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Whoever executes the round-trip (a `Transport`, or an FFI host) sits in
//! between, keeping this layer deterministic and free of I/O.

use reqwest::Url;

use crate::decode;
use crate::error::{ApiError, Resource};
use crate::http::{HttpRequest, HttpResponse};
use crate::model::{CatalogItem, DetailRecord};

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct PokeApi {
    base_url: String,
}

impl PokeApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_catalog(&self, limit: u32, offset: u32) -> Result<HttpRequest, ApiError> {
        let url = format!("{}/pokemon?limit={limit}&offset={offset}", self.base_url);
        Ok(HttpRequest::get(validate_url(url)?))
    }

    /// The API matches names case-sensitively against lower-case names, so
    /// the identifier is lower-cased before it is placed in the path.
    pub fn build_detail(&self, identifier: &str) -> Result<HttpRequest, ApiError> {
        if identifier.is_empty() {
            return Err(ApiError::InvalidRequestUrl("empty identifier".to_string()));
        }
        // Dot segments (also percent-encoded) are resolved away by URL parsers.
        if identifier.chars().all(|c| c == '.')
            || identifier
                .chars()
                .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace())
        {
            return Err(ApiError::InvalidRequestUrl(format!(
                "identifier {identifier:?} is not a single path segment"
            )));
        }
        let url = format!("{}/pokemon/{}", self.base_url, identifier.to_lowercase());
        Ok(HttpRequest::get(validate_url(url)?))
    }

    pub fn parse_catalog(&self, response: HttpResponse) -> Result<Vec<CatalogItem>, ApiError> {
        check_status(&response, Resource::Catalog)?;
        let entries = decode::decode_catalog(&response.body)?;
        Ok(entries.into_iter().map(CatalogItem::from).collect())
    }

    pub fn parse_detail(&self, response: HttpResponse) -> Result<DetailRecord, ApiError> {
        check_status(&response, Resource::Detail)?;
        decode::decode_detail(&response.body)
    }
}

fn validate_url(url: String) -> Result<String, ApiError> {
    match Url::parse(&url) {
        Ok(_) => Ok(url),
        Err(e) => Err(ApiError::InvalidRequestUrl(format!("{url}: {e}"))),
    }
}

/// Anything other than 200 is an error; the body of such responses has no
/// guaranteed schema and is ignored.
fn check_status(response: &HttpResponse, resource: Resource) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        resource,
    })
}
