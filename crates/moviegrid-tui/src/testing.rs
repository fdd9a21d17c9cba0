//! In-memory catalog used by controller tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use moviegrid_api::tmdb::{
    CatalogApi, CatalogError, Genre, MovieDetail, MoviePage, MovieSummary, PopularParams,
    SearchMovieParams,
};

/// Catalog answering from fixed pages, counting calls that reach "the network".
#[derive(Debug, Default)]
pub struct MockCatalog {
    pages: HashMap<(String, u32), MoviePage>,
    details: HashMap<u64, MovieDetail>,
    delays: HashMap<u32, Duration>,
    failure: Option<u16>,
    missing_credential: bool,
    calls: Arc<AtomicUsize>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `page` for the popular endpoint (`term` empty) or a search.
    pub fn with_page(mut self, term: &str, page: MoviePage) -> Self {
        self.pages.insert((String::from(term), page.page), page);
        self
    }

    pub fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.details.insert(detail.id, detail);
        self
    }

    /// Delays responses for `page`.
    pub fn with_delay(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    /// Fails every request with the given HTTP status.
    pub const fn failing(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    /// Behaves like a client built without a credential.
    pub const fn without_credential(mut self) -> Self {
        self.missing_credential = true;
        self
    }

    /// Shared counter of requests that passed the credential check.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    async fn begin(&self, page: u32) -> Result<(), CatalogError> {
        if self.missing_credential {
            return Err(CatalogError::MissingCredential);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(status) = self.failure {
            return Err(CatalogError::Http {
                status,
                body: String::from("mock failure"),
            });
        }
        Ok(())
    }

    fn lookup(&self, term: &str, page: u32) -> Result<MoviePage, CatalogError> {
        self.pages
            .get(&(String::from(term), page))
            .cloned()
            .ok_or_else(|| CatalogError::Http {
                status: 404,
                body: format!("no page {page} for {term:?}"),
            })
    }
}

impl CatalogApi for MockCatalog {
    async fn popular_movies(&self, params: &PopularParams) -> Result<MoviePage, CatalogError> {
        self.begin(params.page).await?;
        self.lookup("", params.page)
    }

    async fn search_movies(&self, params: &SearchMovieParams) -> Result<MoviePage, CatalogError> {
        self.begin(params.page).await?;
        self.lookup(&params.query, params.page)
    }

    async fn movie_details(
        &self,
        movie_id: u64,
        _language: &str,
    ) -> Result<MovieDetail, CatalogError> {
        self.begin(1).await?;
        self.details
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| CatalogError::Api {
                status: 404,
                code: 34,
                message: String::from("The resource you requested could not be found."),
            })
    }
}

pub fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: String::from(title),
        original_title: String::from(title),
        release_date: Some(String::from("2024-07-24")),
        overview: None,
        popularity: 0.0,
        vote_average: 7.83,
        vote_count: 100,
        genre_ids: Vec::new(),
        poster_path: Some(format!("/{id}.jpg")),
        backdrop_path: None,
    }
}

pub fn page_of(page: u32, total_pages: u32, results: Vec<MovieSummary>) -> MoviePage {
    MoviePage {
        page,
        total_results: u32::try_from(results.len()).unwrap(),
        results,
        total_pages,
    }
}

pub fn detail(id: u64, title: &str) -> MovieDetail {
    MovieDetail {
        id,
        title: String::from(title),
        original_title: String::from(title),
        tagline: Some(String::from("Your mind is the scene of the crime.")),
        overview: Some(String::from("A thief who steals corporate secrets.")),
        release_date: Some(String::from("2010-07-15")),
        vote_average: 8.369,
        vote_count: 36_373,
        genres: vec![
            Genre {
                id: 28,
                name: String::from("Action"),
            },
            Genre {
                id: 878,
                name: String::from("Science Fiction"),
            },
        ],
        runtime: Some(148),
        status: Some(String::from("Released")),
        homepage: None,
        imdb_id: None,
        poster_path: None,
        backdrop_path: None,
    }
}

/// The 20-movie, 500-page popular listing fixture.
pub fn popular_fixture() -> MoviePage {
    serde_json::from_str(include_str!("../../../fixtures/tmdb/popular_page1.json")).unwrap()
}
