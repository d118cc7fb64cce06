//! Request Lifecycle
//!
//! Every backend resource moves through idle → loading → success | error.
//! [`RequestState`] makes the payload/error invariants structural: data only
//! exists in `Success`, a message only in `Error`, and `Loading` carries
//! neither.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Lifecycle tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

/// Lifecycle state with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn status(&self) -> Status {
        match self {
            RequestState::Idle => Status::Idle,
            RequestState::Loading => Status::Loading,
            RequestState::Success(_) => Status::Success,
            RequestState::Error(_) => Status::Error,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

/// Stamp handed out when a request starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Observable lifecycle cell owned by one hook.
///
/// Each [`begin`](Resource::begin) issues a newer [`Ticket`]; a result is only
/// applied while its ticket is the latest, so a slow older response can never
/// overwrite a newer one. [`reset`](Resource::reset) invalidates any
/// outstanding ticket.
pub struct Resource<T> {
    state: watch::Sender<RequestState<T>>,
    generation: AtomicU64,
}

impl<T: Clone> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Resource<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> RequestState<T> {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.state.subscribe()
    }

    /// Enter `Loading`, dropping any previous payload or error
    pub fn begin(&self) -> Ticket {
        let mut ticket = Ticket(0);
        self.state.send_modify(|state| {
            ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
            *state = RequestState::Loading;
        });
        ticket
    }

    /// Whether `ticket` still belongs to the latest request
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Apply a result. Returns `false` when the ticket is stale and the
    /// result was discarded.
    pub fn resolve(&self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            *state = match outcome {
                Ok(data) => RequestState::Success(data),
                Err(message) => RequestState::Error(message),
            };
            true
        });

        if !applied {
            tracing::debug!(ticket = ticket.0, "Discarding stale response");
        }
        applied
    }

    /// Back to `Idle`; in-flight results are discarded
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = RequestState::Idle;
        });
    }

    /// [`begin`](Resource::begin) a request whose result must go through
    /// [`Pending::resolve`]. Dropping the handle unresolved rolls back to
    /// `Idle` unless a newer request has started.
    pub fn start(&self) -> Pending<'_, T> {
        Pending {
            resource: self,
            ticket: self.begin(),
            settled: false,
        }
    }
}

/// A request in flight on a [`Resource`]
#[must_use = "dropping a pending request abandons it"]
pub struct Pending<'a, T: Clone> {
    resource: &'a Resource<T>,
    ticket: Ticket,
    settled: bool,
}

impl<T: Clone> Pending<'_, T> {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn is_current(&self) -> bool {
        self.resource.is_current(self.ticket)
    }

    /// Apply the result; `false` if it was stale
    pub fn resolve(mut self, outcome: Result<T, String>) -> bool {
        self.settled = true;
        self.resource.resolve(self.ticket, outcome)
    }
}

impl<T: Clone> Drop for Pending<'_, T> {
    fn drop(&mut self) {
        if !self.settled && self.is_current() {
            tracing::debug!(ticket = self.ticket.0, "Request abandoned, back to idle");
            self.resource.reset();
        }
    }
}
