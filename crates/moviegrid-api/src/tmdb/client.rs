//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::error::CatalogError;
use super::types::{MovieDetail, MoviePage, PopularParams, SearchMovieParams, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Credential used to authenticate against TMDB.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as `Authorization: Bearer`.
    Bearer(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}

/// TMDB API client.
///
/// A client without a credential can be built; every request it makes
/// fails with [`CatalogError::MissingCredential`] before touching the network.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Credential (absent when not configured).
    credential: Option<Credential>,
    /// Per-request timeout.
    timeout: Duration,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    credential: Option<Credential>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            credential: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the credential. Optional; see [`TmdbClient`].
    #[must_use]
    pub fn credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// Sets a v3 API key.
    #[must_use]
    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.credential(Some(Credential::ApiKey(key.into())))
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credential: self.credential,
            timeout,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns `true` when a credential is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Maps a `reqwest` failure to a timeout or transport error.
    fn transport_error(&self, path: &str, source: reqwest::Error) -> CatalogError {
        if source.is_timeout() {
            CatalogError::Timeout {
                path: String::from(path),
                timeout: self.timeout,
            }
        } else {
            CatalogError::Transport {
                path: String::from(path),
                source,
            }
        }
    }

    /// Sends an authenticated GET request and decodes the JSON body.
    ///
    /// Non-2xx responses are errors even when their body is valid JSON.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let Some(credential) = self.credential.as_ref() else {
            tracing::debug!("TMDB credential missing, request not sent");
            return Err(CatalogError::MissingCredential);
        };

        let url = self
            .base_url
            .join(path)
            .map_err(|source| CatalogError::InvalidUrl {
                path: String::from(path),
                source,
            })?;

        let builder = self.http_client.get(url).query(query);
        let builder = match credential {
            Credential::ApiKey(key) => builder.query(&[("api_key", key.as_str())]),
            Credential::Bearer(token) => builder.bearer_auth(token),
        };
        let request = builder
            .build()
            .map_err(|source| self.transport_error(path, source))?;

        // The URL may carry the api_key, so only the path and params are logged.
        tracing::debug!(?query, "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| self.transport_error(path, source))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            tracing::debug!(status = status.as_u16(), "TMDB API error response");
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                return Err(CatalogError::Api {
                    status: status.as_u16(),
                    code: error_response.status_code,
                    message: error_response.status_message,
                });
            }
            return Err(CatalogError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| self.transport_error(path, source))?;
        serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            path: String::from(path),
            source,
        })
    }
}

impl CatalogApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular_movies(&self, params: &PopularParams) -> Result<MoviePage, CatalogError> {
        let query = [
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json("movie/popular", &query).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, params: &SearchMovieParams) -> Result<MoviePage, CatalogError> {
        let query = [
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn movie_details(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<MovieDetail, CatalogError> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }
}
