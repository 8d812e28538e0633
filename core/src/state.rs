//! Observable fetch state.
//!
//! # Design
//! Each client owns one `StatePublisher` and is its only writer. Every write
//! replaces the whole `FetchState` through a `tokio::sync::watch` channel, so
//! observers always see one coherent state and writes are totally ordered.
//! Callers on other tasks or threads reach the publisher only by calling the
//! owning client; they never write state themselves.
//!
//! Overlapping fetches are not sequenced: whichever completes last publishes
//! last and wins.

use std::future::Future;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::ApiError;

/// What a client currently has to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    /// No fetch has been started yet.
    Idle,
    Loading,
    Success(T),
    /// Human-readable description of why the last fetch failed.
    Failure(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            FetchState::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Failure(message) => Some(message),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Failure(_) => "failure",
        }
    }
}

/// Single-writer owner of a `FetchState` and its change notifications.
#[derive(Debug)]
pub struct StatePublisher<T> {
    name: &'static str,
    tx: watch::Sender<FetchState<T>>,
}

impl<T: Clone> StatePublisher<T> {
    pub fn new(name: &'static str) -> Self {
        let (tx, _) = watch::channel(FetchState::Idle);
        Self { name, tx }
    }

    /// A receiver that observes every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> FetchState<T> {
        self.tx.borrow().clone()
    }

    /// Publish `Loading`, run `fetch`, then publish its outcome.
    pub async fn track<F>(&self, fetch: F)
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.publish(FetchState::Loading);
        let next = match fetch.await {
            Ok(payload) => FetchState::Success(payload),
            Err(err) => {
                warn!(client = self.name, error = %err, "fetch failed");
                FetchState::Failure(err.to_string())
            }
        };
        self.publish(next);
    }

    fn publish(&self, state: FetchState<T>) {
        debug!(client = self.name, state = state.label(), "publishing state");
        self.tx.send_replace(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let publisher: StatePublisher<u32> = StatePublisher::new("test");
        assert_eq!(publisher.current(), FetchState::Idle);
        assert_eq!(FetchState::<u32>::default(), FetchState::Idle);
    }

    #[tokio::test]
    async fn track_goes_through_loading_to_success() {
        let publisher = StatePublisher::new("test");
        let mut rx = publisher.subscribe();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let observer = async {
            rx.changed().await.unwrap();
            let seen = rx.borrow_and_update().clone();
            release_tx.send(()).unwrap();
            seen
        };
        let fetch = async {
            release_rx.await.unwrap();
            Ok(7)
        };
        let (seen, ()) = tokio::join!(observer, publisher.track(fetch));

        assert_eq!(seen, FetchState::Loading);
        assert_eq!(publisher.current(), FetchState::Success(7));
        assert_eq!(publisher.current().payload(), Some(&7));
    }

    #[tokio::test]
    async fn failure_drops_previous_payload() {
        let publisher = StatePublisher::new("test");
        publisher.track(async { Ok(vec![1, 2, 3]) }).await;
        assert!(publisher.current().payload().is_some());

        publisher
            .track(async { Err(ApiError::Transport("connection refused".to_string())) })
            .await;

        let state = publisher.current();
        assert!(state.payload().is_none());
        assert_eq!(
            state.error_message(),
            Some("network error: connection refused")
        );
    }

    #[tokio::test]
    async fn refetch_after_failure_reenters_loading() {
        let publisher: StatePublisher<u32> = StatePublisher::new("test");
        publisher
            .track(async { Err(ApiError::Decode("bad".to_string())) })
            .await;

        let mut rx = publisher.subscribe();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let observer = async {
            rx.changed().await.unwrap();
            let seen = rx.borrow_and_update().clone();
            release_tx.send(()).unwrap();
            seen
        };
        let fetch = async {
            release_rx.await.unwrap();
            Ok(1)
        };
        let (seen, ()) = tokio::join!(observer, publisher.track(fetch));
        assert!(seen.is_loading());
        assert_eq!(publisher.current(), FetchState::Success(1));
    }
}
