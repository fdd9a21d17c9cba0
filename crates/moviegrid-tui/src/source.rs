//! Catalog source: the API client plus the display language.

use std::future::Future;
use std::sync::Arc;

use moviegrid_api::tmdb::{
    CatalogApi, CatalogError, MovieDetail, MoviePage, PopularParams, SearchMovieParams,
};
use tracing::instrument;

use crate::catalog::CatalogRequest;
use crate::detail::DetailRequest;

/// Remote catalog source shared by the controllers.
#[derive(Debug)]
pub struct CatalogSource<A> {
    api: Arc<A>,
    language: String,
}

impl<A> Clone for CatalogSource<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            language: self.language.clone(),
        }
    }
}

impl<A: CatalogApi + Sync + 'static> CatalogSource<A> {
    /// Wraps `api`, requesting responses in `language`.
    pub fn new(api: A, language: impl Into<String>) -> Self {
        Self {
            api: Arc::new(api),
            language: language.into(),
        }
    }

    /// Returns the response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the underlying API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Loads one catalog page: `search/movie` when the request has a search
    /// term, `movie/popular` otherwise.
    ///
    /// # Errors
    ///
    /// Returns the client error unchanged.
    #[instrument(skip_all, fields(page = request.page, generation = request.ticket.generation()))]
    pub async fn load_page(&self, request: &CatalogRequest) -> Result<MoviePage, CatalogError> {
        if let Some(term) = request.search_term() {
            tracing::debug!(term, "loading search page");
            let params = SearchMovieParams::new(term)
                .language(&self.language)
                .page(request.page);
            self.api.search_movies(&params).await
        } else {
            tracing::debug!("loading popular page");
            let params = PopularParams::new(request.page).language(&self.language);
            self.api.popular_movies(&params).await
        }
    }

    /// Loads one detail record.
    ///
    /// # Errors
    ///
    /// Returns the client error unchanged.
    #[instrument(skip_all, fields(movie_id = request.movie_id, generation = request.ticket.generation()))]
    pub async fn load_detail(&self, request: &DetailRequest) -> Result<MovieDetail, CatalogError> {
        self.api
            .movie_details(request.movie_id, &self.language)
            .await
    }

    /// Owned future for [`Self::load_page`], suitable for spawning.
    pub fn page_task(
        &self,
        request: CatalogRequest,
    ) -> impl Future<Output = Result<MoviePage, CatalogError>> + Send + use<A> {
        let source = self.clone();
        async move { source.load_page(&request).await }
    }

    /// Owned future for [`Self::load_detail`], suitable for spawning.
    pub fn detail_task(
        &self,
        request: DetailRequest,
    ) -> impl Future<Output = Result<MovieDetail, CatalogError>> + Send + use<A> {
        let source = self.clone();
        async move { source.load_detail(&request).await }
    }
}
