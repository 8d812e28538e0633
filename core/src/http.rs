//! Request and response values exchanged with whoever performs the I/O.
//!
//! # Design
//! `PokeApi` produces `HttpRequest` and consumes `HttpResponse` without
//! touching the network; a `Transport` or an FFI host does the round-trip.
//! Fields are owned so a value can be handed across the C boundary as is.

/// One GET to issue.
///
/// The catalog API is read-only, so every request is a GET and carries no
/// body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub(crate) fn get(url: String) -> Self {
        Self {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Status, headers and body of whatever the server answered.
///
/// Non-2xx responses are still responses: status interpretation belongs to
/// `PokeApi::parse_*`, not to whoever executed the request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
