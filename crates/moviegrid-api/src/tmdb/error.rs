//! Error taxonomy for catalog requests.

use std::time::Duration;

/// Failure of a single catalog request.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// No credential is configured. Raised before any network call.
    #[error(
        "TMDB credential is not configured (set TMDB_API_KEY or tmdb.api_key in config.toml)"
    )]
    MissingCredential,

    /// The request did not complete within the client timeout.
    #[error("request timed out after {}s: {path}", timeout.as_secs())]
    Timeout {
        /// Endpoint path.
        path: String,
        /// Configured timeout.
        timeout: Duration,
    },

    /// Connection or IO failure.
    #[error("request failed: {path}: {source}")]
    Transport {
        /// Endpoint path.
        path: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response carrying a TMDB error body.
    #[error("TMDB API error (HTTP {status}): code={code}, message={message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// TMDB error code.
        code: u32,
        /// TMDB error message.
        message: String,
    },

    /// Non-2xx response with an unrecognized body.
    #[error("TMDB API error (HTTP {status}): {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Response body is not the expected JSON.
    #[error("failed to decode JSON response: {path}: {source}")]
    Decode {
        /// Endpoint path.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Endpoint path could not be joined to the base URL.
    #[error("failed to join URL path: {path}: {source}")]
    InvalidUrl {
        /// Endpoint path.
        path: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

impl CatalogError {
    /// Returns `true` for configuration problems that no request can fix.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }

    /// Returns the HTTP status for error responses.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_configuration() {
        // Arrange & Act
        let err = CatalogError::MissingCredential;

        // Assert
        assert!(err.is_configuration());
        assert!(err.to_string().contains("TMDB_API_KEY"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_api_error_message() {
        // Arrange & Act
        let err = CatalogError::Api {
            status: 404,
            code: 34,
            message: String::from("The resource you requested could not be found."),
        };

        // Assert
        assert!(!err.is_configuration());
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "TMDB API error (HTTP 404): code=34, message=The resource you requested could not be found."
        );
    }

    #[test]
    fn test_timeout_message() {
        // Arrange & Act
        let err = CatalogError::Timeout {
            path: String::from("movie/popular"),
            timeout: Duration::from_secs(10),
        };

        // Assert
        assert_eq!(err.to_string(), "request timed out after 10s: movie/popular");
    }
}
