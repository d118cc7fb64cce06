//! AI suggestions hook.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{AnalysisBackend, Suggestion};
use crate::state::{LoadingToast, Notifier, RequestState, Resource, Status, Ticket};

pub struct SuggestionsResource {
    backend: Arc<dyn AnalysisBackend>,
    notifier: Arc<dyn Notifier>,
    state: Resource<Vec<Suggestion>>,
    keys: Mutex<FetchKeys>,
}

/// Dataset ids the hook has already acted on
#[derive(Debug, Default)]
struct FetchKeys {
    in_flight: Option<(String, Ticket)>,
    fetched: Option<String>,
}

impl FetchKeys {
    fn is_in_flight(&self, dataset_id: &str) -> bool {
        matches!(&self.in_flight, Some((id, _)) if id == dataset_id)
    }
}

/// Clears the in-flight marker of one request when it ends, however it ends
struct InFlight<'a> {
    keys: &'a Mutex<FetchKeys>,
    ticket: Ticket,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if matches!(keys.in_flight, Some((_, ticket)) if ticket == self.ticket) {
            keys.in_flight = None;
        }
    }
}

impl SuggestionsResource {
    pub fn new(backend: Arc<dyn AnalysisBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            state: Resource::new(),
            keys: Mutex::new(FetchKeys::default()),
        }
    }

    fn keys(&self) -> MutexGuard<'_, FetchKeys> {
        self.keys.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> RequestState<Vec<Suggestion>> {
        self.state.snapshot()
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn resource(&self) -> &Resource<Vec<Suggestion>> {
        &self.state
    }

    /// Dataset id of the last successful fetch
    pub fn fetched_for(&self) -> Option<String> {
        self.keys().fetched.clone()
    }

    /// Fetch suggestions for `dataset_id`.
    ///
    /// Returns `false` without touching the network when the id is empty,
    /// already fetched, or already being fetched. Dropping the future early
    /// releases the id so the fetch can be retried.
    pub async fn fetch_suggestions(&self, dataset_id: &str) -> bool {
        if dataset_id.is_empty() {
            return false;
        }
        let pending = {
            let mut keys = self.keys();
            if keys.fetched.as_deref() == Some(dataset_id) || keys.is_in_flight(dataset_id) {
                tracing::debug!(dataset_id, "Suggestions already requested, skipping");
                return false;
            }
            let pending = self.state.start();
            keys.in_flight = Some((dataset_id.to_string(), pending.ticket()));
            pending
        };
        let in_flight = InFlight {
            keys: &self.keys,
            ticket: pending.ticket(),
        };

        let toast = LoadingToast::show(self.notifier.as_ref(), "Generating AI suggestions...");
        tracing::info!(dataset_id, "Requesting suggestions");

        let result = self
            .backend
            .get_suggestions(dataset_id)
            .await
            .map(dedupe_by_title)
            .map_err(|e| e.to_string());

        toast.dismiss();

        if result.is_ok() && pending.is_current() {
            self.keys().fetched = Some(dataset_id.to_string());
        }
        drop(in_flight);

        let notice = match &result {
            Ok(suggestions) => {
                tracing::info!(dataset_id, count = suggestions.len(), "Suggestions received");
                Ok("Suggestions generated!".to_string())
            }
            Err(e) => {
                tracing::error!(dataset_id, error = %e, "Suggestion request failed");
                Err(format!("Error: {}", e))
            }
        };

        if pending.resolve(result) {
            match notice {
                Ok(m) => self.notifier.success(&m),
                Err(m) => self.notifier.error(&m),
            };
        }
        true
    }

    /// Forget the current dataset's suggestions
    pub fn reset(&self) {
        {
            let mut keys = self.keys();
            keys.in_flight = None;
            keys.fetched = None;
        }
        self.state.reset();
    }
}

/// Keep the first suggestion of each title
pub fn dedupe_by_title(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| {
            let fresh = seen.insert(s.title.clone());
            if !fresh {
                tracing::warn!(title = %s.title, "Dropping suggestion with duplicate title");
            }
            fresh
        })
        .collect()
}
