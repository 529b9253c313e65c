//! Single-flight request slots bound to a view's lifetime.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};
use wellness_core::{Outcome, RequestState};

/// Shared flag that is cleared when the owning view is torn down.
///
/// Responses that arrive after teardown are dropped instead of applied.
#[derive(Debug, Clone)]
pub struct ViewGuard {
    live: Arc<AtomicBool>,
}

impl Default for ViewGuard {
    fn default() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl ViewGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    pub fn teardown(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

/// One request slot: at most one request in flight, results applied only
/// while the view is live.
#[derive(Debug)]
pub struct Panel<T> {
    name: &'static str,
    state: Mutex<RequestState<T>>,
    guard: ViewGuard,
}

impl<T: Clone> Panel<T> {
    pub fn new(name: &'static str, guard: ViewGuard) -> Self {
        Self {
            name,
            state: Mutex::new(RequestState::Idle),
            guard,
        }
    }

    pub fn is_live(&self) -> bool {
        self.guard.is_live()
    }

    /// Claim the slot. Returns `false` if a request is already pending.
    pub async fn begin(&self) -> bool {
        let started = self.state.lock().await.begin();
        if !started {
            debug!("{}: request already in flight, ignoring", self.name);
        }
        started
    }

    /// Apply the result of a request started with [`Panel::begin`].
    pub async fn finish(&self, result: Result<T, String>) -> Outcome {
        if !self.guard.is_live() {
            debug!("{}: view torn down, discarding response", self.name);
            return Outcome::Discarded;
        }

        let mut state = self.state.lock().await;
        match result {
            Ok(value) => {
                state.succeed(value);
                Outcome::Completed
            }
            Err(message) => {
                warn!("{}: request failed: {}", self.name, message);
                state.fail(message);
                Outcome::Failed
            }
        }
    }

    /// Run `request` in this slot. The future is not polled at all when
    /// another request is already pending.
    pub async fn run<F>(&self, request: F) -> Outcome
    where
        F: Future<Output = Result<T, String>>,
    {
        if !self.begin().await {
            return Outcome::Ignored;
        }
        let result = request.await;
        self.finish(result).await
    }

    pub async fn state(&self) -> RequestState<T> {
        self.state.lock().await.clone()
    }

    pub async fn value(&self) -> Option<T> {
        self.state.lock().await.value().cloned()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error().map(str::to_string)
    }

    pub async fn is_pending(&self) -> bool {
        self.state.lock().await.is_pending()
    }
}
