//! In-memory stand-in for the remote catalog API.
//!
//! Serves the list and detail endpoints with the same JSON shapes as the
//! public API, over a fixed set of records.

mod fixtures;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Base used for the `url` of each list entry unless overridden.
pub const DEFAULT_PUBLIC_BASE: &str = "https://pokeapi.co/api/v2";

const DEFAULT_PAGE_LIMIT: usize = 20;

/// The records a server instance serves, plus the base its list URLs use.
#[derive(Debug, Clone)]
pub struct Dataset {
    public_base: String,
    records: Vec<Value>,
}

impl Dataset {
    /// Each record must carry a numeric `id` and a string `name`.
    pub fn new(public_base: &str, records: Vec<Value>) -> Self {
        Self {
            public_base: public_base.trim_end_matches('/').to_string(),
            records,
        }
    }

    pub fn fixtures() -> Self {
        Self::new(DEFAULT_PUBLIC_BASE, fixtures::records())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Numeric identifiers match `id`; anything else matches `name` exactly.
    fn find(&self, identifier: &str) -> Option<&Value> {
        match identifier.parse::<u64>() {
            Ok(id) => self.records.iter().find(|r| r["id"].as_u64() == Some(id)),
            Err(_) => self
                .records
                .iter()
                .find(|r| r["name"].as_str() == Some(identifier)),
        }
    }

    fn entry(&self, record: &Value) -> NamedResource {
        NamedResource {
            name: record["name"].as_str().unwrap_or_default().to_string(),
            url: format!("{}/pokemon/{}/", self.public_base, record["id"]),
        }
    }

    fn page_url(&self, offset: usize, limit: usize) -> String {
        format!("{}/pokemon?offset={offset}&limit={limit}", self.public_base)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

type Db = Arc<Dataset>;

pub fn app() -> Router {
    app_with(Dataset::fixtures())
}

pub fn app_with(dataset: Dataset) -> Router {
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/{identifier}", get(get_pokemon))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(dataset))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn list_pokemon(State(db): State<Db>, Query(page): Query<Page>) -> Json<ListResponse> {
    let limit = page.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = page.offset.unwrap_or(0);
    let count = db.len();

    let results: Vec<NamedResource> = db
        .records
        .iter()
        .skip(offset)
        .take(limit)
        .map(|r| db.entry(r))
        .collect();

    let next = (offset.saturating_add(limit) < count)
        .then(|| db.page_url(offset + limit, limit));
    let previous = (offset > 0).then(|| db.page_url(offset.saturating_sub(limit), limit));

    debug!(limit, offset, returned = results.len(), "list page");
    Json(ListResponse {
        count,
        next,
        previous,
        results,
    })
}

async fn get_pokemon(
    State(db): State<Db>,
    Path(identifier): Path<String>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    match db.find(&identifier) {
        Some(record) => Ok(Json(record.clone())),
        None => {
            debug!(identifier, "no such record");
            Err((StatusCode::NOT_FOUND, "Not Found"))
        }
    }
}
