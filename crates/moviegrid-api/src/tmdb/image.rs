//! Poster image URLs on the TMDB static asset host.

use url::Url;

/// Base URL of the TMDB image host.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Width buckets served by the image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    /// 185px wide.
    W185,
    /// 342px wide (grid cards).
    W342,
    /// 500px wide (detail page).
    W500,
    /// Original upload.
    Original,
}

impl PosterSize {
    /// Returns the path segment for this bucket.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// Builds the poster URL for `poster_path` at the given size.
///
/// Returns `None` when the path is absent or blank, so callers render a
/// placeholder instead of requesting `.../w342` with an empty segment.
#[must_use]
pub fn poster_url(poster_path: Option<&str>, size: PosterSize) -> Option<Url> {
    let path = poster_path.map(str::trim).filter(|p| !p.is_empty())?;
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Url::parse(&format!("{IMAGE_BASE_URL}{}/{path}", size.as_str())).ok()
}
