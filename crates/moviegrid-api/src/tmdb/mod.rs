//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and builds poster URLs on the static image host.

mod api;
mod client;
mod error;
mod image;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{Credential, DEFAULT_TIMEOUT, TmdbClient, TmdbClientBuilder};
pub use error::CatalogError;
pub use image::{IMAGE_BASE_URL, PosterSize, poster_url};
pub use types::{
    Genre, MovieDetail, MoviePage, MovieSummary, PopularParams, SearchMovieParams,
};
