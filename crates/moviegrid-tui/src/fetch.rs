//! Fetch cycle bookkeeping.
//!
//! Every request carries a [`RequestTicket`]. A controller only applies a
//! completion whose ticket matches the latest one issued by its
//! [`FetchTracker`], so a late response from a superseded query is dropped.

use std::future::Future;

use moviegrid_api::tmdb::CatalogError;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

/// Generation number attached to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Returns the generation number.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Issues request tickets and tells which one is current.
#[derive(Debug, Default)]
pub struct FetchTracker {
    generation: u64,
}

impl FetchTracker {
    /// Issues a new ticket, superseding all earlier ones.
    pub const fn issue(&mut self) -> RequestTicket {
        self.generation = self.generation.wrapping_add(1);
        RequestTicket(self.generation)
    }

    /// Supersedes all issued tickets without issuing a new one.
    pub const fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether `ticket` is the latest one issued.
    #[must_use]
    pub const fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }
}

/// Status of a controller's fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus<T> {
    /// No request issued yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Success(T),
    /// The latest request failed; carries a human-readable reason.
    Error(String),
}

impl<T> Default for FetchStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Input to [`FetchStatus::transition`].
#[derive(Debug)]
pub enum FetchEvent<T> {
    /// A new request was issued.
    Started,
    /// The current request succeeded.
    Succeeded(T),
    /// The current request failed.
    Failed(String),
    /// The controller has nothing to show.
    Reset,
}

impl<T> FetchStatus<T> {
    /// Pure state transition.
    ///
    /// Completions only apply while `Loading`; in any other state they leave
    /// the status unchanged.
    #[must_use]
    pub fn transition(self, event: FetchEvent<T>) -> Self {
        match (self, event) {
            (_, FetchEvent::Started) => Self::Loading,
            (_, FetchEvent::Reset) => Self::Idle,
            (Self::Loading, FetchEvent::Succeeded(value)) => Self::Success(value),
            (Self::Loading, FetchEvent::Failed(reason)) => Self::Error(reason),
            (state, FetchEvent::Succeeded(_) | FetchEvent::Failed(_)) => state,
        }
    }

    /// Applies `event` in place.
    pub fn apply(&mut self, event: FetchEvent<T>) {
        *self = std::mem::take(self).transition(event);
    }

    /// Whether the status is `Loading`.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the success value.
    #[must_use]
    pub const fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error reason.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Result of a dispatched request, tagged with its ticket.
#[derive(Debug)]
pub struct Completion<T> {
    /// Ticket the request was issued with.
    pub ticket: RequestTicket,
    /// Response or failure.
    pub result: Result<T, CatalogError>,
}

/// Runs at most one request at a time on the tokio runtime.
///
/// Dispatching aborts the previous task; completions are delivered over a
/// channel and drained by the event loop.
#[derive(Debug)]
pub struct FetchDispatcher<T> {
    handle: Handle,
    tx: UnboundedSender<Completion<T>>,
    rx: UnboundedReceiver<Completion<T>>,
    in_flight: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> FetchDispatcher<T> {
    /// Creates a dispatcher spawning onto `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            handle,
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Spawns `task`, aborting any request still in flight.
    pub fn dispatch<F>(&mut self, ticket: RequestTicket, task: F)
    where
        F: Future<Output = Result<T, CatalogError>> + Send + 'static,
    {
        self.cancel();
        let tx = self.tx.clone();
        let join = self.handle.spawn(async move {
            let result = task.await;
            // The receiver is gone only when the view is shutting down.
            let _ = tx.send(Completion { ticket, result });
        });
        self.in_flight = Some(join);
    }

    /// Aborts the request in flight, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    /// Returns the next completion without waiting.
    pub fn try_recv(&mut self) -> Option<Completion<T>> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next completion.
    pub async fn recv(&mut self) -> Option<Completion<T>> {
        self.rx.recv().await
    }
}

impl<T> Drop for FetchDispatcher<T> {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
