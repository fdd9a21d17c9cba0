//! Catalog controller: query state plus the fetch cycle of the list page.

use moviegrid_api::tmdb::{CatalogApi, CatalogError, MoviePage, MovieSummary};

use crate::fetch::{FetchEvent, FetchStatus, FetchTracker, RequestTicket};
use crate::query::QueryState;
use crate::source::CatalogSource;

/// A catalog request to issue, snapshotting the query it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    /// Ticket to hand back with the completion.
    pub ticket: RequestTicket,
    /// Requested page.
    pub page: u32,
    /// Search text at the time of the request.
    pub search: String,
}

impl CatalogRequest {
    /// Returns the trimmed search term, or `None` for the popular listing.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }
}

/// State machine behind the catalog page.
///
/// Every query change returns a [`CatalogRequest`] for the caller to run;
/// the caller hands the response back through [`CatalogController::complete`].
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogController {
    query: QueryState,
    status: FetchStatus<Vec<MovieSummary>>,
    tracker: FetchTracker,
}

impl CatalogController {
    /// Creates a controller seeded with `query`. Nothing is fetched yet.
    #[must_use]
    pub fn new(query: QueryState) -> Self {
        Self {
            query,
            status: FetchStatus::Idle,
            tracker: FetchTracker::default(),
        }
    }

    /// Returns the query state.
    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    /// Returns the fetch status.
    #[must_use]
    pub const fn status(&self) -> &FetchStatus<Vec<MovieSummary>> {
        &self.status
    }

    /// Movies of the current page, empty unless the last cycle succeeded.
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        self.status.success().map_or(&[], Vec::as_slice)
    }

    /// Replaces the search text, rewinds to page 1 and starts a new cycle.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> CatalogRequest {
        self.query.set_search(text.into());
        self.fetch_current_page()
    }

    /// Advances one page. `None` (and no state change) at the last page.
    pub fn go_to_next_page(&mut self) -> Option<CatalogRequest> {
        self.query.next_page().then(|| self.fetch_current_page())
    }

    /// Goes back one page. `None` (and no state change) at page 1.
    pub fn go_to_previous_page(&mut self) -> Option<CatalogRequest> {
        self.query.previous_page().then(|| self.fetch_current_page())
    }

    /// Starts a cycle for the current query.
    ///
    /// Enters `Loading` and supersedes any request still in flight.
    pub fn fetch_current_page(&mut self) -> CatalogRequest {
        let ticket = self.tracker.issue();
        self.status.apply(FetchEvent::Started);
        tracing::debug!(
            generation = ticket.generation(),
            page = self.query.page(),
            search = self.query.search(),
            "catalog fetch started"
        );
        CatalogRequest {
            ticket,
            page: self.query.page(),
            search: String::from(self.query.search()),
        }
    }

    /// Applies a completion. Returns `false` when `ticket` was superseded,
    /// in which case nothing changes.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<MoviePage, CatalogError>,
    ) -> bool {
        if !self.tracker.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "discarding superseded catalog response"
            );
            return false;
        }
        match result {
            Ok(page) => {
                tracing::debug!(
                    generation = ticket.generation(),
                    results = page.results.len(),
                    total_pages = page.total_pages,
                    "catalog fetch succeeded"
                );
                self.query.set_total_pages(page.total_pages);
                self.status.apply(FetchEvent::Succeeded(page.results));
            }
            Err(err) => {
                tracing::debug!(generation = ticket.generation(), error = %err, "catalog fetch failed");
                self.status.apply(FetchEvent::Failed(err.to_string()));
            }
        }
        true
    }

    /// Runs one full cycle against `source` and waits for it.
    pub async fn refresh<A: CatalogApi + Sync + 'static>(
        &mut self,
        source: &CatalogSource<A>,
    ) -> bool {
        let request = self.fetch_current_page();
        let result = source.load_page(&request).await;
        self.complete(request.ticket, result)
    }
}
