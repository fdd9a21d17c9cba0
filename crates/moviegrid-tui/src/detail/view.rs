//! Detail view model.

use moviegrid_api::tmdb::{MovieDetail, PosterSize};

use super::state::DetailController;
use crate::fetch::FetchStatus;
use crate::format::{DateStyle, Poster, localized_date, rating_badge, rating_score, runtime_label};

/// Rendered fields of one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Tagline, when TMDB has one.
    pub tagline: Option<String>,
    /// Poster at the detail bucket, or a placeholder.
    pub poster: Poster,
    /// Localized release date.
    pub release_date: String,
    /// Score, e.g. `"8.4 / 10"`.
    pub score: String,
    /// Rating badge, e.g. `"84%"`.
    pub rating: String,
    /// Overview text, empty when missing.
    pub overview: String,
    /// Genre names joined with `", "`.
    pub genres: String,
    /// Runtime, e.g. `"148 minutes"`.
    pub runtime: String,
}

impl DetailPanel {
    /// Builds the panel from a detail record.
    #[must_use]
    pub fn from_detail(movie: &MovieDetail, style: DateStyle) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            tagline: movie
                .tagline
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            poster: Poster::from_path(movie.poster_path.as_deref(), PosterSize::W500),
            release_date: localized_date(movie.release_date.as_deref(), style),
            score: rating_score(movie.vote_average),
            rating: rating_badge(movie.vote_average),
            overview: movie.overview.clone().unwrap_or_default(),
            genres: movie.genre_names().join(", "),
            runtime: runtime_label(movie.runtime),
        }
    }
}

/// What the detail page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// No movie selected.
    Empty,
    /// Loading indicator only.
    Loading,
    /// Error reason only.
    Error(String),
    /// Movie fields.
    Movie(DetailPanel),
}

impl DetailView {
    /// Derives the view from the controller state.
    #[must_use]
    pub fn from_controller(controller: &DetailController, style: DateStyle) -> Self {
        match controller.status() {
            FetchStatus::Idle => Self::Empty,
            FetchStatus::Loading => Self::Loading,
            FetchStatus::Error(reason) => Self::Error(reason.clone()),
            FetchStatus::Success(movie) => Self::Movie(DetailPanel::from_detail(movie, style)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use moviegrid_api::tmdb::MovieDetail;

    use super::*;
    use crate::testing::detail;

    fn fixture() -> MovieDetail {
        serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/movie_detail_27205.json"
        ))
        .unwrap()
    }

    #[test]
    fn test_panel_from_fixture() {
        // Arrange
        let movie = fixture();

        // Act
        let panel = DetailPanel::from_detail(&movie, DateStyle::MonthDayYear);

        // Assert
        assert_eq!(panel.title, "Inception");
        assert_eq!(
            panel.tagline.as_deref(),
            Some("Your mind is the scene of the crime.")
        );
        assert_eq!(panel.genres, "Action, Science Fiction, Adventure");
        assert_eq!(panel.runtime, "148 minutes");
        assert_eq!(panel.score, "8.4 / 10");
        assert_eq!(panel.rating, "84%");
        assert_eq!(panel.release_date, "7/15/2010");
        assert!(
            panel
                .poster
                .url()
                .unwrap()
                .as_str()
                .starts_with("https://image.tmdb.org/t/p/w500/")
        );
    }

    #[test]
    fn test_view_branches_follow_status() {
        // Arrange
        let mut controller = DetailController::new();
        assert_eq!(
            DetailView::from_controller(&controller, DateStyle::Iso),
            DetailView::Empty
        );
        let request = controller.set_movie_id(Some(27_205)).unwrap();
        assert_eq!(
            DetailView::from_controller(&controller, DateStyle::Iso),
            DetailView::Loading
        );

        // Act
        controller.complete(request.ticket, Ok(detail(27_205, "Inception")));

        // Assert
        let DetailView::Movie(panel) = DetailView::from_controller(&controller, DateStyle::Iso)
        else {
            panic!("expected movie panel");
        };
        assert_eq!(panel.poster, Poster::Placeholder);
        assert_eq!(panel.release_date, "2010-07-15");
    }
}
