//! Catalog view model derived from controller state.

use moviegrid_api::tmdb::{MovieSummary, PosterSize};

use super::state::CatalogController;
use crate::fetch::FetchStatus;
use crate::format::{DateStyle, Poster, localized_date, rating_badge};

/// One movie card of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Poster at the card bucket, or a placeholder.
    pub poster: Poster,
    /// Rating badge, e.g. `"78%"`.
    pub rating: String,
    /// Localized release date, `-` when unknown.
    pub release_date: String,
}

impl MovieCard {
    /// Builds a card from a catalog entry.
    #[must_use]
    pub fn from_summary(movie: &MovieSummary, style: DateStyle) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster: Poster::from_path(movie.poster_path.as_deref(), PosterSize::W342),
            rating: rating_badge(movie.vote_average),
            release_date: localized_date(movie.release_date.as_deref(), style),
        }
    }
}

/// Grid of cards plus pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGrid {
    /// Cards in response order.
    pub cards: Vec<MovieCard>,
    /// Current page.
    pub page: u32,
    /// Total pages from the last response.
    pub total_pages: u32,
    /// Whether "Previous" is enabled.
    pub previous_enabled: bool,
    /// Whether "Next" is enabled.
    pub next_enabled: bool,
}

/// What the catalog page shows. Exactly one branch at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    /// Loading indicator only.
    Loading,
    /// Error reason only.
    Error(String),
    /// Card grid with pagination.
    Grid(CatalogGrid),
}

impl CatalogView {
    /// Derives the view from the controller state.
    ///
    /// A controller that has not fetched yet renders as loading.
    #[must_use]
    pub fn from_controller(controller: &CatalogController, style: DateStyle) -> Self {
        match controller.status() {
            FetchStatus::Idle | FetchStatus::Loading => Self::Loading,
            FetchStatus::Error(reason) => Self::Error(reason.clone()),
            FetchStatus::Success(movies) => {
                let query = controller.query();
                Self::Grid(CatalogGrid {
                    cards: movies
                        .iter()
                        .map(|movie| MovieCard::from_summary(movie, style))
                        .collect(),
                    page: query.page(),
                    total_pages: query.total_pages(),
                    previous_enabled: query.has_previous(),
                    next_enabled: query.has_next(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::panic)]

    use moviegrid_api::tmdb::CatalogError;

    use super::*;
    use crate::query::QueryState;
    use crate::testing::{movie, page_of, popular_fixture};

    fn grid(view: CatalogView) -> CatalogGrid {
        match view {
            CatalogView::Grid(grid) => grid,
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_load_renders_twenty_cards() {
        // Arrange
        let mut controller = CatalogController::new(QueryState::default());
        let request = controller.fetch_current_page();
        assert_eq!(request.search_term(), None);
        assert_eq!(request.page, 1);

        // Act
        controller.complete(request.ticket, Ok(popular_fixture()));
        let grid = grid(CatalogView::from_controller(
            &controller,
            DateStyle::MonthDayYear,
        ));

        // Assert
        assert_eq!(grid.cards.len(), 20);
        assert!(!grid.previous_enabled);
        assert!(grid.next_enabled);
        assert_eq!(grid.page, 1);
        assert_eq!(grid.total_pages, 500);
    }

    #[test]
    fn test_loading_shows_only_indicator() {
        // Arrange
        let mut controller = CatalogController::default();

        // Act
        let idle = CatalogView::from_controller(&controller, DateStyle::Iso);
        let _ = controller.fetch_current_page();
        let loading = CatalogView::from_controller(&controller, DateStyle::Iso);

        // Assert
        assert_eq!(idle, CatalogView::Loading);
        assert_eq!(loading, CatalogView::Loading);
    }

    #[test]
    fn test_error_shows_only_reason() {
        // Arrange
        let mut controller = CatalogController::default();
        let request = controller.fetch_current_page();

        // Act
        controller.complete(request.ticket, Err(CatalogError::MissingCredential));

        // Assert
        assert_eq!(
            CatalogView::from_controller(&controller, DateStyle::Iso),
            CatalogView::Error(CatalogError::MissingCredential.to_string())
        );
    }

    #[test]
    fn test_card_fields() {
        // Arrange
        let mut controller = CatalogController::default();
        let request = controller.fetch_current_page();
        controller.complete(
            request.ticket,
            Ok(page_of(1, 1, vec![movie(27_205, "Inception")])),
        );

        // Act
        let grid = grid(CatalogView::from_controller(
            &controller,
            DateStyle::MonthDayYear,
        ));

        // Assert
        let card = &grid.cards[0];
        assert_eq!(card.id, 27_205);
        assert_eq!(card.rating, "78%");
        assert_eq!(card.release_date, "7/24/2024");
        assert_eq!(
            card.poster.url().unwrap().as_str(),
            "https://image.tmdb.org/t/p/w342/27205.jpg"
        );
        assert!(!grid.previous_enabled);
        assert!(!grid.next_enabled);
    }

    #[test]
    fn test_missing_posters_render_placeholder() {
        // Arrange
        let mut controller = CatalogController::default();
        let request = controller.fetch_current_page();
        controller.complete(request.ticket, Ok(popular_fixture()));

        // Act
        let grid = grid(CatalogView::from_controller(&controller, DateStyle::Iso));

        // Assert
        let placeholders: Vec<&str> = grid
            .cards
            .iter()
            .filter(|card| card.poster == Poster::Placeholder)
            .map(|card| card.title.as_str())
            .collect();
        assert_eq!(
            placeholders,
            vec!["The Union", "Cuckoo", "Unreleased Feature"]
        );
        let unreleased = grid.cards.last().unwrap();
        assert_eq!(unreleased.rating, "0%");
        assert_eq!(unreleased.release_date, "-");
    }
}
