//! Display formatting for ratings, dates, runtimes and posters.

use chrono::NaiveDate;
use moviegrid_api::tmdb::{PosterSize, poster_url};
use url::Url;

/// Placeholder for missing values.
const MISSING: &str = "-";

/// Converts a 0-10 vote average to a rounded 0-100 percentage.
#[must_use]
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rating_percent(vote_average: f64) -> u8 {
    if !vote_average.is_finite() {
        return 0;
    }
    // Clamped to 0..=100 before the cast.
    (vote_average * 10.0).round().clamp(0.0, 100.0) as u8
}

/// Formats the rating badge, e.g. `7.83` -> `"78%"`.
#[must_use]
pub fn rating_badge(vote_average: f64) -> String {
    format!("{}%", rating_percent(vote_average))
}

/// Formats the vote average with one decimal, e.g. `"8.4 / 10"`.
#[must_use]
pub fn rating_score(vote_average: f64) -> String {
    format!("{vote_average:.1} / 10")
}

/// Date layout for a display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `7/15/2010` (en-US).
    MonthDayYear,
    /// `15/07/2010` (most European locales).
    DayMonthYear,
    /// `2010/07/15` (ja, zh, ko).
    YearMonthDay,
    /// `2010-07-15`.
    Iso,
}

impl DateStyle {
    /// Picks the date layout for a BCP 47 language tag such as `"en-US"`.
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        let mut parts = tag.split(['-', '_']);
        let primary = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().map(str::to_ascii_uppercase);
        match primary.as_str() {
            "" => Self::Iso,
            "ja" | "zh" | "ko" => Self::YearMonthDay,
            "en" => match region.as_deref() {
                None | Some("US") => Self::MonthDayYear,
                Some(_) => Self::DayMonthYear,
            },
            _ => Self::DayMonthYear,
        }
    }

    /// Returns the `chrono` format pattern.
    const fn pattern(self) -> &'static str {
        match self {
            Self::MonthDayYear => "%-m/%-d/%Y",
            Self::DayMonthYear => "%d/%m/%Y",
            Self::YearMonthDay => "%Y/%m/%d",
            Self::Iso => "%Y-%m-%d",
        }
    }
}

/// Formats a TMDB release date (`YYYY-MM-DD`) for display.
///
/// Missing or empty dates render as `-`; unparseable ones are shown verbatim.
#[must_use]
pub fn localized_date(raw: Option<&str>, style: DateStyle) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return String::from(MISSING);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_or_else(
        |_| String::from(raw),
        |date| date.format(style.pattern()).to_string(),
    )
}

/// Formats a runtime, e.g. `"148 minutes"`.
#[must_use]
pub fn runtime_label(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{m} minutes"),
        _ => String::from(MISSING),
    }
}

/// Poster slot of a card or detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster {
    /// Poster image URL.
    Image(Url),
    /// No poster available.
    Placeholder,
}

impl Poster {
    /// Resolves a poster path at the given size.
    #[must_use]
    pub fn from_path(poster_path: Option<&str>, size: PosterSize) -> Self {
        poster_url(poster_path, size).map_or(Self::Placeholder, Self::Image)
    }

    /// Returns the image URL, if any.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        match self {
            Self::Image(url) => Some(url),
            Self::Placeholder => None,
        }
    }

    /// Short label for terminal display.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Image(url) => url
                .path_segments()
                .and_then(Iterator::last)
                .map_or_else(|| url.to_string(), String::from),
            Self::Placeholder => String::from("[ no poster ]"),
        }
    }
}

/// Truncates `text` to `max` characters, appending an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return String::from(text);
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_badge_rounds() {
        // Arrange & Act & Assert
        assert_eq!(rating_badge(7.83), "78%");
        assert_eq!(rating_badge(0.0), "0%");
        assert_eq!(rating_badge(10.0), "100%");
    }

    #[test]
    fn test_rating_percent_out_of_range() {
        // Arrange & Act & Assert
        assert_eq!(rating_percent(-1.0), 0);
        assert_eq!(rating_percent(12.0), 100);
        assert_eq!(rating_percent(f64::NAN), 0);
    }

    #[test]
    fn test_rating_score() {
        // Arrange & Act & Assert
        assert_eq!(rating_score(8.369), "8.4 / 10");
    }

    #[test]
    fn test_date_style_for_language() {
        // Arrange & Act & Assert
        assert_eq!(DateStyle::for_language("en-US"), DateStyle::MonthDayYear);
        assert_eq!(DateStyle::for_language("en"), DateStyle::MonthDayYear);
        assert_eq!(DateStyle::for_language("en-GB"), DateStyle::DayMonthYear);
        assert_eq!(DateStyle::for_language("fr-FR"), DateStyle::DayMonthYear);
        assert_eq!(DateStyle::for_language("ja-JP"), DateStyle::YearMonthDay);
        assert_eq!(DateStyle::for_language(""), DateStyle::Iso);
    }

    #[test]
    fn test_localized_date() {
        // Arrange & Act & Assert
        assert_eq!(
            localized_date(Some("2010-07-15"), DateStyle::MonthDayYear),
            "7/15/2010"
        );
        assert_eq!(
            localized_date(Some("2010-07-15"), DateStyle::DayMonthYear),
            "15/07/2010"
        );
        assert_eq!(
            localized_date(Some("2010-07-15"), DateStyle::YearMonthDay),
            "2010/07/15"
        );
    }

    #[test]
    fn test_localized_date_missing_or_invalid() {
        // Arrange & Act & Assert
        assert_eq!(localized_date(None, DateStyle::Iso), "-");
        assert_eq!(localized_date(Some(""), DateStyle::Iso), "-");
        assert_eq!(localized_date(Some("2010"), DateStyle::Iso), "2010");
    }

    #[test]
    fn test_runtime_label() {
        // Arrange & Act & Assert
        assert_eq!(runtime_label(Some(148)), "148 minutes");
        assert_eq!(runtime_label(Some(0)), "-");
        assert_eq!(runtime_label(None), "-");
    }

    #[test]
    fn test_poster_placeholder_for_missing_path() {
        // Arrange & Act & Assert
        assert_eq!(
            Poster::from_path(None, PosterSize::W342),
            Poster::Placeholder
        );
        assert_eq!(
            Poster::from_path(Some(""), PosterSize::W342),
            Poster::Placeholder
        );
        assert_eq!(Poster::Placeholder.label(), "[ no poster ]");
    }

    #[test]
    fn test_poster_label_is_file_name() {
        // Arrange
        let poster = Poster::from_path(Some("/abc.jpg"), PosterSize::W342);

        // Act & Assert
        assert_eq!(poster.label(), "abc.jpg");
        assert_eq!(
            poster.url().map(Url::as_str),
            Some("https://image.tmdb.org/t/p/w342/abc.jpg")
        );
    }

    #[test]
    fn test_truncate() {
        // Arrange & Act & Assert
        assert_eq!(truncate("Inception", 20), "Inception");
        assert_eq!(truncate("Kingdom of the Planet", 8), "Kingdom\u{2026}");
    }
}
