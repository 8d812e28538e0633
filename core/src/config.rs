//! Client configuration.

/// Public PokeAPI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "POKEAPI_BASE_URL";

/// Settings shared by `CatalogClient` and `DetailClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Defaults, with `POKEAPI_BASE_URL` taking precedence when set and
    /// non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(BASE_URL_ENV) {
            Some(base_url) if !base_url.trim().is_empty() => Self::new(base_url.trim()),
            _ => Self::default(),
        }
    }
}
