//! Latest-wins fetch coordinator

use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::query;
use crate::types::{PageResponse, QueryResult, TableState};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// Outcome of a finished request, tagged with its request id
#[derive(Debug)]
pub struct Completion<T> {
    pub(crate) id: u64,
    pub(crate) outcome: Result<QueryResult<T>>,
}

impl<T> Completion<T> {
    /// Request id this completion belongs to
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// What [`FetchCoordinator::apply`] did with a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Current request succeeded; result replaced
    Loaded { id: u64, total: u64 },
    /// Current request failed; result cleared, error stored
    Failed { id: u64, message: String },
    /// Completion of a superseded request; nothing changed
    Stale { id: u64 },
}

/// Issues endpoint requests and applies only the latest response
pub struct FetchCoordinator<T> {
    client: HttpClient,
    endpoint: String,
    request_id: u64,
    in_flight: Option<AbortHandle>,
    completions_tx: mpsc::UnboundedSender<Completion<T>>,
    completions_rx: mpsc::UnboundedReceiver<Completion<T>>,
    loading: bool,
    error: Option<Error>,
    result: Option<QueryResult<T>>,
}

impl<T> FetchCoordinator<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Create a coordinator for the given endpoint path
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            client,
            endpoint: endpoint.into(),
            request_id: 0,
            in_flight: None,
            completions_tx,
            completions_rx,
            loading: false,
            error: None,
            result: None,
        }
    }

    /// Start a fetch for `state`, superseding any request in flight.
    ///
    /// Returns the new request id.
    pub fn begin(&mut self, state: &TableState) -> u64 {
        self.abort_in_flight();

        self.request_id += 1;
        let id = self.request_id;
        self.loading = true;
        self.error = None;

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let request = RequestConfig::new().query_pairs(query::to_pairs(state));
        let tx = self.completions_tx.clone();

        debug!(id, endpoint = %endpoint, "Starting fetch: {}", query::encode(state));

        let handle = tokio::spawn(async move {
            let outcome = client
                .get_json::<PageResponse<T>>(&endpoint, request)
                .await
                .map(QueryResult::from);
            // The receiver lives as long as the coordinator
            let _ = tx.send(Completion { id, outcome });
        });
        self.in_flight = Some(handle.abort_handle());

        id
    }

    /// Wait for the next completion, current or stale
    pub async fn next_completion(&mut self) -> Completion<T> {
        match self.completions_rx.recv().await {
            Some(completion) => completion,
            // Unreachable while `completions_tx` is held by self
            None => std::future::pending().await,
        }
    }
}

impl<T> FetchCoordinator<T> {
    /// Apply a completion if it belongs to the current request
    pub fn apply(&mut self, completion: Completion<T>) -> Applied {
        let Completion { id, outcome } = completion;

        if id != self.request_id {
            debug!(id, current = self.request_id, "Discarding stale response");
            return Applied::Stale { id };
        }

        self.loading = false;
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                let total = result.total;
                self.result = Some(result);
                self.error = None;
                Applied::Loaded { id, total }
            }
            Err(e) => {
                warn!(id, "Fetch failed: {e}");
                let message = e.to_string();
                self.result = None;
                self.error = Some(e);
                Applied::Failed { id, message }
            }
        }
    }

    /// Abort the in-flight request and invalidate any completion it may
    /// already have queued. Not reported as an error.
    pub fn cancel(&mut self) {
        self.abort_in_flight();
        self.request_id += 1;
        self.loading = false;
    }

    /// Whether `id` is the current request
    pub fn is_current(&self, id: u64) -> bool {
        id == self.request_id
    }

    /// Id of the most recent request; 0 before the first one
    pub fn current_id(&self) -> u64 {
        self.request_id
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&QueryResult<T>> {
        self.result.as_ref()
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for FetchCoordinator<T> {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

impl<T> std::fmt::Debug for FetchCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("endpoint", &self.endpoint)
            .field("request_id", &self.request_id)
            .field("loading", &self.loading)
            .field("has_error", &self.error.is_some())
            .finish_non_exhaustive()
    }
}
