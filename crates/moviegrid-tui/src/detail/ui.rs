//! Detail page rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::view::{DetailPanel, DetailView};

/// Draws the detail view into `area`.
pub fn draw(frame: &mut Frame, area: Rect, view: &DetailView) {
    let paragraph = match view {
        DetailView::Empty => Paragraph::new("No movie selected")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Movie ")),
        DetailView::Loading => Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Movie ")),
        DetailView::Error(reason) => Paragraph::new(reason.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Error ")),
        DetailView::Movie(panel) => Paragraph::new(panel_lines(panel))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", panel.title))
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
    };
    frame.render_widget(paragraph, area);
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<10}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn panel_lines(panel: &DetailPanel) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(10);
    if let Some(tagline) = &panel.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::default());
    }
    lines.push(field("Rating", format!("{}  ({})", panel.score, panel.rating)));
    lines.push(field("Released", panel.release_date.clone()));
    lines.push(field("Runtime", panel.runtime.clone()));
    lines.push(field("Genres", panel.genres.clone()));
    lines.push(field(
        "Poster",
        panel
            .poster
            .url()
            .map_or_else(|| panel.poster.label(), ToString::to_string),
    ));
    lines.push(Line::default());
    lines.push(Line::from(panel.overview.clone()));
    lines
}
