//! Error types for the catalog client.
//!
//! # Design
//! Every failure is non-fatal and ends up as the message of a
//! `FetchState::Failure`, so the `Display` text is what users read. A non-200
//! status carries the `Resource` it was fetched for because "pokemon not
//! found" is a different, actionable situation from "the catalog did not
//! load".

use thiserror::Error;

/// Which endpoint a request addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Catalog,
    Detail,
}

/// Errors produced while building, executing, or parsing a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request URL could not be composed from the base and inputs.
    #[error("invalid request URL: {0}")]
    InvalidRequestUrl(String),

    /// The network call itself failed (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// A response arrived with a status other than 200.
    #[error("{}", status_message(.status, .resource))]
    HttpStatus { status: u16, resource: Resource },

    /// A 200 response whose body does not match the expected schema.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the response, for `HttpStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn status_message(status: &u16, resource: &Resource) -> String {
    match resource {
        Resource::Catalog => format!("error {status}: could not load the catalog"),
        Resource::Detail if (400..500).contains(status) => {
            format!("error {status}: pokemon not found")
        }
        Resource::Detail => format!("error {status}: could not load pokemon"),
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
