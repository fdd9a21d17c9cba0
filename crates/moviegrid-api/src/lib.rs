//! Catalog client library for moviegrid.
//!
//! Provides the TMDB client used as the remote catalog source.

/// TMDB API client.
pub mod tmdb;
