//! TUI rendering logic for the browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{BrowserState, InputMode, Screen};
use crate::{catalog, detail};

/// Width of one card in columns, borders included.
pub const CARD_WIDTH: u16 = 30;

/// Draws the browser UI. Returns the main content area width for the grid
/// column count.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(catalog::ui::CARD_HEIGHT),
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    match state.screen {
        Screen::Catalog => catalog::ui::draw(
            frame,
            chunks[1],
            &state.catalog_view(),
            state.selected(),
            columns_for(chunks[1].width),
        ),
        Screen::Detail => detail::ui::draw(frame, chunks[1], &state.detail_view()),
    }

    draw_footer(frame, chunks[2], state);

    chunks[1].width
}

/// Number of cards that fit next to each other.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn columns_for(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// Draws the search input and the shareable link.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.catalog.query().search())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let link = Paragraph::new(state.address.current().as_str())
        .style(Style::default().fg(Color::Blue))
        .block(Block::default().borders(Borders::ALL).title(" Link "));
    frame.render_widget(link, header_chunks[1]);
}

/// Draws key help and the status message.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help = match (state.input_mode, state.screen) {
        (InputMode::Search, _) => "type to search  Enter/Esc: done",
        (InputMode::Normal, Screen::Catalog) => {
            "hjkl/arrows: move  n/p: page  /: search  Enter: details  o: poster  r: reload  q: quit"
        }
        (InputMode::Normal, Screen::Detail) => "Esc: back  o: poster  r: reload  q: quit",
    };
    let mut spans = vec![Span::styled(help, Style::default().fg(Color::DarkGray))];
    if let Some(status) = &state.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }
    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
