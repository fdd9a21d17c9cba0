//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::CatalogError;
use super::types::{MovieDetail, MoviePage, PopularParams, SearchMovieParams};

/// Remote catalog source.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait,
/// which is the one implemented by clients that get spawned onto the runtime.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches a page of popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if no credential is configured, the HTTP request
    /// fails or times out, the status is not 2xx, or JSON parsing fails.
    async fn popular_movies(&self, params: &PopularParams) -> Result<MoviePage, CatalogError>;

    /// Searches movies by free text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LocalCatalogApi::popular_movies`].
    async fn search_movies(&self, params: &SearchMovieParams) -> Result<MoviePage, CatalogError>;

    /// Fetches the detail record of one movie.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LocalCatalogApi::popular_movies`].
    async fn movie_details(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<MovieDetail, CatalogError>;
}
