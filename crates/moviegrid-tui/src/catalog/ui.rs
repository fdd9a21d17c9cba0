//! Catalog page rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::view::{CatalogGrid, CatalogView, MovieCard};
use crate::format::truncate;

/// Height of one card in rows, borders included.
pub const CARD_HEIGHT: u16 = 6;

/// Draws the catalog view into `area`. `selected` indexes the highlighted card.
pub fn draw(frame: &mut Frame, area: Rect, view: &CatalogView, selected: usize, columns: usize) {
    match view {
        CatalogView::Loading => {
            let loading = Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Movies "));
            frame.render_widget(loading, area);
        }
        CatalogView::Error(reason) => {
            let error = Paragraph::new(reason.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Error "));
            frame.render_widget(error, area);
        }
        CatalogView::Grid(grid) => draw_grid(frame, area, grid, selected, columns),
    }
}

/// Draws the card grid and the pagination bar.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn draw_grid(frame: &mut Frame, area: Rect, grid: &CatalogGrid, selected: usize, columns: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(CARD_HEIGHT), // cards
            Constraint::Length(1),        // pagination
        ])
        .split(area);

    let columns = columns.max(1);
    let visible_rows = usize::from(chunks[0].height / CARD_HEIGHT).max(1);
    let selected_row = selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));

    if grid.cards.is_empty() {
        let empty = Paragraph::new("No movies found")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Movies "));
        frame.render_widget(empty, chunks[0]);
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(chunks[0]);
    let column_constraints =
        vec![Constraint::Ratio(1, u32::try_from(columns).unwrap_or(1)); columns];

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let start = (first_row + row_offset) * columns;
        let Some(row_cards) = grid.cards.get(start..grid.cards.len().min(start + columns)) else {
            break;
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);
        for (col, card) in row_cards.iter().enumerate() {
            draw_card(frame, cells[col], card, start + col == selected);
        }
    }

    frame.render_widget(pagination_line(grid), chunks[1]);
}

/// Draws one card.
fn draw_card(frame: &mut Frame, area: Rect, card: &MovieCard, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let width = usize::from(area.width.saturating_sub(2));

    let lines = vec![
        Line::from(Span::styled(
            truncate(&card.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("{:>4}", card.rating), rating_style(&card.rating)),
            Span::raw("  "),
            Span::raw(card.release_date.clone()),
        ]),
        Line::from(Span::styled(
            truncate(&card.poster.label(), width),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

/// Colors the badge the way the rating ring does: green, yellow, red.
fn rating_style(badge: &str) -> Style {
    let percent: u8 = badge.trim_end_matches('%').parse().unwrap_or(0);
    let color = match percent {
        70.. => Color::Green,
        40..70 => Color::Yellow,
        _ => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// "< Previous  Page 1 / 500  Next >" with disabled controls dimmed.
fn pagination_line(grid: &CatalogGrid) -> Paragraph<'static> {
    let control = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    };
    Paragraph::new(Line::from(vec![
        control("< Previous (p)", grid.previous_enabled),
        Span::raw(format!("   Page {} / {}   ", grid.page, grid.total_pages)),
        control("(n) Next >", grid.next_enabled),
    ]))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_style_thresholds() {
        // Arrange & Act & Assert
        assert_eq!(rating_style("84%").fg, Some(Color::Green));
        assert_eq!(rating_style("58%").fg, Some(Color::Yellow));
        assert_eq!(rating_style("0%").fg, Some(Color::Red));
    }
}
