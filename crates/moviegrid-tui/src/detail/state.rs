//! Detail controller: one movie record and its fetch cycle.

use moviegrid_api::tmdb::{CatalogApi, CatalogError, MovieDetail};

use crate::fetch::{FetchEvent, FetchStatus, FetchTracker, RequestTicket};
use crate::source::CatalogSource;

/// A detail request to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    /// Ticket to hand back with the completion.
    pub ticket: RequestTicket,
    /// Requested movie.
    pub movie_id: u64,
}

/// State machine behind the detail page.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailController {
    movie_id: Option<u64>,
    status: FetchStatus<MovieDetail>,
    tracker: FetchTracker,
}

impl DetailController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected movie.
    #[must_use]
    pub const fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    /// Returns the fetch status.
    #[must_use]
    pub const fn status(&self) -> &FetchStatus<MovieDetail> {
        &self.status
    }

    /// Selects a movie.
    ///
    /// `None` drops back to `Idle` without a request and discards whatever
    /// is still in flight.
    pub fn set_movie_id(&mut self, movie_id: Option<u64>) -> Option<DetailRequest> {
        self.movie_id = movie_id;
        if movie_id.is_none() {
            self.tracker.invalidate();
            self.status.apply(FetchEvent::Reset);
            return None;
        }
        self.reload()
    }

    /// Starts a new cycle for the selected movie, if any.
    pub fn reload(&mut self) -> Option<DetailRequest> {
        let movie_id = self.movie_id?;
        let ticket = self.tracker.issue();
        self.status.apply(FetchEvent::Started);
        tracing::debug!(
            generation = ticket.generation(),
            movie_id,
            "detail fetch started"
        );
        Some(DetailRequest { ticket, movie_id })
    }

    /// Applies a completion. Returns `false` when `ticket` was superseded.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<MovieDetail, CatalogError>,
    ) -> bool {
        if !self.tracker.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "discarding superseded detail response"
            );
            return false;
        }
        let event = match result {
            Ok(detail) => FetchEvent::Succeeded(detail),
            Err(err) => {
                tracing::debug!(generation = ticket.generation(), error = %err, "detail fetch failed");
                FetchEvent::Failed(err.to_string())
            }
        };
        self.status.apply(event);
        true
    }

    /// Runs one full cycle for `movie_id` against `source`.
    pub async fn refresh<A: CatalogApi + Sync + 'static>(
        &mut self,
        source: &CatalogSource<A>,
        movie_id: u64,
    ) -> bool {
        let Some(request) = self.set_movie_id(Some(movie_id)) else {
            return false;
        };
        let result = source.load_detail(&request).await;
        self.complete(request.ticket, result)
    }
}
