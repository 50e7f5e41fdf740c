//! Single-flight search coordination.
//!
//! Each [`RequestCoordinator::submit`] cancels whatever request is still in
//! flight and starts a new one. A request only touches [`UiState`] if it is
//! still the current request when it settles; that check happens under the
//! same lock `submit` takes to replace the current request, so a superseded
//! response can never overwrite a newer one, whatever order they arrive in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::{
    domain::{ResultRecord, SearchQuery},
    error::{SearchError, TransportError},
};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::transport::SearchTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// What the form renders. Fields change only through submission outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    loading: bool,
    error_message: String,
    results: Vec<ResultRecord>,
}

impl UiState {
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Empty when there is nothing to show.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error_message.clear();
    }

    fn succeed(&mut self, results: Vec<ResultRecord>) {
        self.loading = false;
        self.error_message.clear();
        self.results = results;
    }

    // Prior results stay on screen after a failure.
    fn fail(&mut self, message: String) {
        self.loading = false;
        self.error_message = message;
    }
}

/// The live request. Owned by the coordinator; dropped on settlement or
/// cancelled on supersession.
pub struct RequestHandle {
    id: RequestId,
    task: JoinHandle<()>,
}

impl RequestHandle {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Aborts the transport future at its next suspension point. A settlement
    /// that races past the abort is rejected by the current-request check.
    pub fn cancel(self) {
        self.task.abort();
    }
}

/// Caller-side view of one submission.
pub struct Submission {
    id: RequestId,
    outcome: oneshot::Receiver<Result<Vec<ResultRecord>, SearchError>>,
}

impl Submission {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Resolves once this submission's outcome is known. A superseded or
    /// torn-down submission resolves to [`SearchError::Cancelled`].
    pub async fn settled(self) -> Result<Vec<ResultRecord>, SearchError> {
        match self.outcome.await {
            Ok(outcome) => outcome,
            Err(_) => Err(SearchError::Cancelled),
        }
    }
}

#[derive(Default)]
struct CoordinatorInner {
    last_request_id: u64,
    current: Option<RequestHandle>,
}

pub struct RequestCoordinator<T: SearchTransport + 'static> {
    transport: Arc<T>,
    inner: Arc<Mutex<CoordinatorInner>>,
    state_tx: Arc<watch::Sender<UiState>>,
}

impl<T: SearchTransport + 'static> RequestCoordinator<T> {
    pub fn new(transport: T) -> Self {
        let (state_tx, _) = watch::channel(UiState::default());
        Self {
            transport: Arc::new(transport),
            inner: Arc::new(Mutex::new(CoordinatorInner::default())),
            state_tx: Arc::new(state_tx),
        }
    }

    pub fn state(&self) -> UiState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state_tx.subscribe()
    }

    pub fn current_request(&self) -> Option<RequestId> {
        lock(&self.inner).current.as_ref().map(RequestHandle::id)
    }

    /// Cancels the live request, if any, and issues `query`. Must be called
    /// from within a Tokio runtime.
    pub fn submit(&self, query: SearchQuery) -> Submission {
        let mut inner = lock(&self.inner);
        if let Some(previous) = inner.current.take() {
            debug!(request_id = previous.id.0, "cancelling superseded search");
            previous.cancel();
        }

        inner.last_request_id += 1;
        let id = RequestId(inner.last_request_id);
        self.state_tx.send_modify(UiState::begin);

        debug!(
            request_id = id.0,
            has_number = query.number().is_some(),
            "issuing search"
        );
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let transport = Arc::clone(&self.transport);
        let shared_inner = Arc::clone(&self.inner);
        let state_tx = Arc::clone(&self.state_tx);
        // The lock is still held, so the task cannot settle before it is
        // registered as current.
        let task = tokio::spawn(async move {
            let result = transport.search(&query).await;
            let outcome = settle(&shared_inner, &state_tx, id, result);
            let _ = outcome_tx.send(outcome);
        });
        inner.current = Some(RequestHandle { id, task });

        Submission {
            id,
            outcome: outcome_rx,
        }
    }

    /// Teardown: cancels the live request without touching [`UiState`].
    pub fn shutdown(&self) {
        if let Some(live) = lock(&self.inner).current.take() {
            debug!(request_id = live.id.0, "cancelling search on teardown");
            live.cancel();
        }
    }
}

impl<T: SearchTransport + 'static> Drop for RequestCoordinator<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock(inner: &Mutex<CoordinatorInner>) -> MutexGuard<'_, CoordinatorInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn settle(
    inner: &Mutex<CoordinatorInner>,
    state_tx: &watch::Sender<UiState>,
    id: RequestId,
    result: Result<Vec<ResultRecord>, TransportError>,
) -> Result<Vec<ResultRecord>, SearchError> {
    let mut inner = lock(inner);
    if inner.current.as_ref().map(RequestHandle::id) != Some(id) {
        debug!(request_id = id.0, "ignoring settlement of superseded search");
        return Err(SearchError::Cancelled);
    }
    inner.current = None;

    match result {
        Ok(records) => {
            info!(
                request_id = id.0,
                result_count = records.len(),
                "search succeeded"
            );
            let shown = records.clone();
            state_tx.send_modify(move |state| state.succeed(shown));
            Ok(records)
        }
        Err(err) => {
            let err = SearchError::from(err);
            warn!(request_id = id.0, "search failed: {err}");
            let message = err.user_message().unwrap_or_default();
            state_tx.send_modify(move |state| state.fail(message));
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
