//! Query state: search text, page cursor and known page count.

/// The (search text, page) pair that determines what the catalog shows,
/// plus the page count reported by the last successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Current page (never below 1).
    page: u32,
    /// Free-text search (may be empty).
    search: String,
    /// Total pages from the last successful fetch (never below 1).
    total_pages: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            total_pages: 1,
        }
    }
}

impl QueryState {
    /// Creates a query state, clamping `page` to at least 1.
    #[must_use]
    pub fn new(search: impl Into<String>, page: u32) -> Self {
        Self {
            page: page.max(1),
            search: search.into(),
            total_pages: 1,
        }
    }

    /// Returns the current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the raw search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the trimmed search term, or `None` when blank.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Returns the total page count.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether "next" is enabled.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether "previous" is enabled.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Replaces the search text and rewinds to page 1.
    ///
    /// The page count belongs to the previous search, so it is reset too.
    pub(crate) fn set_search(&mut self, text: String) {
        self.search = text;
        self.page = 1;
        self.total_pages = 1;
    }

    /// Advances one page. Returns `false` at the last page.
    pub(crate) fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page = self.page.saturating_add(1);
        true
    }

    /// Goes back one page. Returns `false` at page 1.
    pub(crate) fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page = self.page.saturating_sub(1).max(1);
        true
    }

    /// Records the page count reported by the API (0 becomes 1).
    pub(crate) fn set_total_pages(&mut self, total: u32) {
        self.total_pages = total.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        // Arrange & Act
        let query = QueryState::default();

        // Assert
        assert_eq!(query.page(), 1);
        assert_eq!(query.search(), "");
        assert_eq!(query.total_pages(), 1);
        assert!(!query.has_next());
        assert!(!query.has_previous());
    }

    #[test]
    fn test_new_clamps_page_zero() {
        // Arrange & Act
        let query = QueryState::new("dune", 0);

        // Assert
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_search_term_trims_blank() {
        // Arrange & Act & Assert
        assert_eq!(QueryState::new("   ", 1).search_term(), None);
        assert_eq!(QueryState::new("  dune ", 1).search_term(), Some("dune"));
    }

    #[test]
    fn test_next_page_stops_at_total() {
        // Arrange
        let mut query = QueryState::new("", 1);
        query.set_total_pages(2);

        // Act & Assert
        assert!(query.next_page());
        assert_eq!(query.page(), 2);
        assert!(!query.next_page());
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn test_previous_page_stops_at_one() {
        // Arrange
        let mut query = QueryState::new("", 2);

        // Act & Assert
        assert!(query.previous_page());
        assert_eq!(query.page(), 1);
        assert!(!query.previous_page());
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_set_search_resets_page_and_total() {
        // Arrange
        let mut query = QueryState::new("", 7);
        query.set_total_pages(500);

        // Act
        query.set_search(String::from("alien"));

        // Assert
        assert_eq!(query.page(), 1);
        assert_eq!(query.total_pages(), 1);
        assert_eq!(query.search(), "alien");
    }

    #[test]
    fn test_zero_total_pages_becomes_one() {
        // Arrange
        let mut query = QueryState::default();

        // Act
        query.set_total_pages(0);

        // Assert
        assert_eq!(query.total_pages(), 1);
    }
}
