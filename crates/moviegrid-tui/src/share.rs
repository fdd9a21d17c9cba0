//! Shareable links.
//!
//! The catalog page is addressed as `{base}?search=<text>&page=<n>` and a
//! movie as `{base}movie/{id}`. [`AddressBar`] mirrors the visible state into
//! such a link; it only observes state and never starts a fetch.

use anyhow::{Context, Result};
use url::Url;

use crate::query::QueryState;

/// Default base URL for shareable links.
pub const DEFAULT_SHARE_BASE: &str = "https://moviegrid.app/";

/// Page addressed by a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Catalog page with its query state.
    Catalog {
        /// Search text, empty for the popular listing.
        search: String,
        /// Page number, at least 1.
        page: u32,
    },
    /// Detail page; `None` when the ID is not a number.
    Movie(Option<u64>),
}

impl Route {
    /// Seeds catalog query state from the route. Movie routes start on page 1.
    #[must_use]
    pub fn query_state(&self) -> QueryState {
        match self {
            Self::Catalog { search, page } => QueryState::new(search.clone(), *page),
            Self::Movie(_) => QueryState::default(),
        }
    }
}

/// Builds and parses links under one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    base: Url,
}

impl ShareLink {
    /// Creates a link builder. A trailing `/` is added to the base path.
    #[must_use]
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Self { base }
    }

    /// Parses `base` and creates a link builder.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute URL.
    pub fn parse(base: &str) -> Result<Self> {
        let url = Url::parse(base).with_context(|| format!("invalid share base URL: {base}"))?;
        Ok(Self::new(url))
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Link to the catalog page. `search` is omitted when blank.
    #[must_use]
    pub fn catalog_url(&self, search: &str, page: u32) -> Url {
        let mut url = self.base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            let search = search.trim();
            if !search.is_empty() {
                pairs.append_pair("search", search);
            }
            pairs.append_pair("page", &page.max(1).to_string());
        }
        url
    }

    /// Link to a movie page.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined to the base URL.
    pub fn movie_url(&self, movie_id: u64) -> Result<Url> {
        self.base
            .join(&format!("movie/{movie_id}"))
            .with_context(|| format!("failed to build movie link for {movie_id}"))
    }

    /// Parses a link into a route.
    ///
    /// Paths other than `movie/{id}` address the catalog. A missing or
    /// invalid `page` reads as 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `link` is not an absolute URL.
    pub fn route(&self, link: &str) -> Result<Route> {
        let url = Url::parse(link).with_context(|| format!("invalid link: {link}"))?;
        let relative = url
            .path()
            .strip_prefix(self.base.path())
            .unwrap_or_else(|| url.path().trim_start_matches('/'));
        let mut segments = relative.split('/').filter(|s| !s.is_empty());

        if segments.next() == Some("movie") {
            let movie_id = segments.next().and_then(|id| id.parse().ok());
            return Ok(Route::Movie(movie_id));
        }

        let mut search = String::new();
        let mut page = 1;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "search" => search = value.into_owned(),
                "page" => {
                    page = value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1);
                }
                _ => {}
            }
        }
        Ok(Route::Catalog { search, page })
    }
}

/// Current shareable link of the running view.
#[derive(Debug, Clone)]
pub struct AddressBar {
    link: ShareLink,
    current: Url,
}

impl AddressBar {
    /// Starts at the catalog page for `query`.
    #[must_use]
    pub fn new(link: ShareLink, query: &QueryState) -> Self {
        let current = link.catalog_url(query.search(), query.page());
        Self { link, current }
    }

    /// Returns the link builder.
    #[must_use]
    pub const fn link(&self) -> &ShareLink {
        &self.link
    }

    /// Returns the current link.
    #[must_use]
    pub const fn current(&self) -> &Url {
        &self.current
    }

    /// Mirrors the catalog query. Returns whether the link changed.
    pub fn reflect_catalog(&mut self, query: &QueryState) -> bool {
        let next = self.link.catalog_url(query.search(), query.page());
        self.replace(next)
    }

    /// Mirrors a detail page. Returns whether the link changed.
    pub fn reflect_movie(&mut self, movie_id: u64) -> bool {
        match self.link.movie_url(movie_id) {
            Ok(next) => self.replace(next),
            Err(err) => {
                tracing::debug!(movie_id, error = %err, "cannot reflect movie link");
                false
            }
        }
    }

    fn replace(&mut self, next: Url) -> bool {
        if next == self.current {
            return false;
        }
        tracing::debug!(link = %next, "address updated");
        self.current = next;
        true
    }
}
