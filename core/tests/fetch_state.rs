//! State-machine behaviour of the clients, driven by a scripted transport.
//!
//! Responses are keyed by request URL and delivered through oneshot
//! channels, so a test decides exactly when (and in which order) each
//! in-flight request completes.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use pokedex_core::{
    ApiError, CatalogClient, CatalogItem, ClientConfig, DetailClient, FetchState, HttpRequest,
    HttpResponse, Transport,
};
use serde_json::json;
use tokio::sync::{oneshot, watch};

const BASE: &str = "http://api.test";

struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<oneshot::Receiver<HttpResponse>>>>,
    issued: watch::Sender<usize>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            issued: watch::channel(0).0,
        }
    }

    /// Answer the next request for `path` with whatever is later sent on
    /// the returned sender.
    fn deferred(&self, path: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.routes
            .lock()
            .unwrap()
            .entry(format!("{BASE}{path}"))
            .or_default()
            .push_back(rx);
        tx
    }

    /// Answer the next request for `path` with `response` immediately.
    fn ready(&self, path: &str, response: HttpResponse) {
        self.deferred(path).send(response).unwrap();
    }

    /// Counts requests that reached the transport.
    fn issued(&self) -> watch::Receiver<usize> {
        self.issued.subscribe()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.issued.send_modify(|n| *n += 1);
        let route = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&request.url)
            .and_then(VecDeque::pop_front);
        match route {
            Some(rx) => rx
                .await
                .map_err(|_| ApiError::Transport("script dropped".to_string())),
            None => Err(ApiError::Transport(format!("no route to {}", request.url))),
        }
    }
}

fn config() -> ClientConfig {
    ClientConfig::new(BASE)
}

fn list_body(names: &[(&str, u32)]) -> HttpResponse {
    let results: Vec<_> = names
        .iter()
        .map(|(name, id)| json!({"name": name, "url": format!("{BASE}/pokemon/{id}/")}))
        .collect();
    HttpResponse::new(200, json!({ "results": results }).to_string())
}

fn detail_body(id: u32, name: &str) -> HttpResponse {
    let body = json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "types": [{"slot": 1, "type": {"name": "grass"}}],
        "stats": [{"base_stat": 45, "effort": 0, "stat": {"name": "hp"}}],
        "sprites": {"front_default": null}
    });
    HttpResponse::new(200, body.to_string())
}

fn first_name(state: &FetchState<Vec<CatalogItem>>) -> Option<String> {
    state.payload().and_then(|items| items.first()).map(|i| i.name.clone())
}

// ---------------------------------------------------------------------------
// Overlapping fetches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn last_completion_wins_when_second_trigger_finishes_last() {
    let transport = ScriptedTransport::new();
    let release_a = transport.deferred("/pokemon?limit=10&offset=0");
    let release_b = transport.deferred("/pokemon?limit=10&offset=10");
    let mut issued = transport.issued();
    let client = CatalogClient::with_transport(&config(), transport);
    let mut watcher = client.subscribe();

    let driver = async {
        issued.wait_for(|n| *n == 2).await.unwrap();
        release_a.send(list_body(&[("bulbasaur", 1)])).unwrap();
        watcher
            .wait_for(|s| first_name(s).as_deref() == Some("bulbasaur"))
            .await
            .unwrap();
        release_b.send(list_body(&[("ivysaur", 2)])).unwrap();
    };
    tokio::join!(
        client.fetch_catalog(10, 0),
        client.fetch_catalog(10, 10),
        driver
    );

    assert_eq!(first_name(&client.state()).as_deref(), Some("ivysaur"));
}

#[tokio::test]
async fn last_completion_wins_when_first_trigger_finishes_last() {
    let transport = ScriptedTransport::new();
    let release_a = transport.deferred("/pokemon?limit=10&offset=0");
    let release_b = transport.deferred("/pokemon?limit=10&offset=10");
    let mut issued = transport.issued();
    let client = CatalogClient::with_transport(&config(), transport);
    let mut watcher = client.subscribe();

    let driver = async {
        issued.wait_for(|n| *n == 2).await.unwrap();
        release_b.send(list_body(&[("ivysaur", 2)])).unwrap();
        watcher
            .wait_for(|s| first_name(s).as_deref() == Some("ivysaur"))
            .await
            .unwrap();
        release_a.send(list_body(&[("bulbasaur", 1)])).unwrap();
    };
    tokio::join!(
        client.fetch_catalog(10, 0),
        client.fetch_catalog(10, 10),
        driver
    );

    assert_eq!(first_name(&client.state()).as_deref(), Some("bulbasaur"));
}

#[tokio::test]
async fn late_failure_overrides_earlier_success() {
    let transport = ScriptedTransport::new();
    let release_ok = transport.deferred("/pokemon?limit=5&offset=0");
    let release_err = transport.deferred("/pokemon?limit=5&offset=5");
    let mut issued = transport.issued();
    let client = CatalogClient::with_transport(&config(), transport);
    let mut watcher = client.subscribe();

    let driver = async {
        issued.wait_for(|n| *n == 2).await.unwrap();
        release_ok.send(list_body(&[("bulbasaur", 1)])).unwrap();
        watcher.wait_for(|s| s.payload().is_some()).await.unwrap();
        release_err.send(HttpResponse::new(503, "busy")).unwrap();
    };
    tokio::join!(
        client.fetch_catalog(5, 0),
        client.fetch_catalog(5, 5),
        driver
    );

    assert_eq!(
        client.state(),
        FetchState::Failure("error 503: could not load the catalog".to_string())
    );
    assert!(client.items().is_empty());
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refetch_publishes_loading_and_clears_error() {
    let transport = ScriptedTransport::new();
    transport.ready("/pokemon?limit=1000&offset=0", HttpResponse::new(500, ""));
    let release_retry = transport.deferred("/pokemon?limit=1000&offset=0");
    let client = CatalogClient::with_transport(&config(), transport);

    client.refresh().await;
    assert!(client.state().error_message().is_some());

    let mut watcher = client.subscribe();
    let observer = async {
        watcher.changed().await.unwrap();
        let seen = watcher.borrow_and_update().clone();
        release_retry.send(list_body(&[("pikachu", 25)])).unwrap();
        seen
    };
    let (seen, ()) = tokio::join!(observer, client.refresh());

    assert!(seen.is_loading());
    assert_eq!(seen.error_message(), None);
    assert_eq!(first_name(&client.state()).as_deref(), Some("pikachu"));
}

#[tokio::test]
async fn unscripted_request_is_a_transport_failure() {
    let client = CatalogClient::with_transport(&config(), ScriptedTransport::new());

    client.fetch_catalog(1, 0).await;
    let message = client.state().error_message().unwrap().to_string();
    assert!(message.starts_with("network error: no route"), "{message}");
}

#[tokio::test]
async fn empty_catalog_is_success() {
    let transport = ScriptedTransport::new();
    transport.ready("/pokemon?limit=1000&offset=0", list_body(&[]));
    let client = CatalogClient::with_transport(&config(), transport);

    client.refresh().await;
    assert_eq!(client.state(), FetchState::Success(Vec::new()));
}

#[tokio::test]
async fn not_found_leaves_no_stale_detail() {
    let transport = ScriptedTransport::new();
    transport.ready("/pokemon/bulbasaur", detail_body(1, "bulbasaur"));
    transport.ready("/pokemon/nonexistent", HttpResponse::new(404, "Not Found"));
    let client = DetailClient::with_transport(&config(), transport);

    client.fetch_detail("bulbasaur").await;
    assert_eq!(client.record().unwrap().id, 1);

    client.fetch_detail("nonexistent").await;
    let state = client.state();
    assert!(matches!(&state, FetchState::Failure(msg) if msg.contains("404")));
    assert!(state.payload().is_none());
    assert!(client.record().is_none());
}

#[tokio::test]
async fn detail_identifier_is_lowercased_before_request() {
    let transport = ScriptedTransport::new();
    transport.ready("/pokemon/bulbasaur", detail_body(1, "bulbasaur"));
    let client = DetailClient::with_transport(&config(), transport);

    client.fetch_detail("BULBASAUR").await;
    assert_eq!(client.record().unwrap().display_name(), "Bulbasaur");
}

#[tokio::test]
async fn invalid_identifier_never_reaches_transport() {
    let client = DetailClient::with_transport(&config(), ScriptedTransport::new());

    for identifier in ["mr mime", ".", ".."] {
        client.fetch_detail(identifier).await;
        let message = client.state().error_message().unwrap().to_string();
        assert!(message.starts_with("invalid request URL"), "{identifier:?}: {message}");
    }
}
