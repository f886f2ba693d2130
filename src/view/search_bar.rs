//! Search input bar.

use crate::state::MonitorState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the search bar.
///
/// Shows the live query, a block cursor while editing, and a match
/// counter once a query is set.
pub fn render_search_bar(frame: &mut Frame, area: Rect, monitor: &MonitorState, editing: bool) {
    let query = monitor.query();

    let mut spans = vec![Span::raw(query.to_string())];
    if editing {
        spans.push(Span::styled(
            " ",
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if !query.is_empty() {
        let total = monitor.highlight_spans().len();
        let counter = match (total, monitor.match_cursor()) {
            (0, _) => "  no matches".to_string(),
            (_, Some(cursor)) => format!("  {}/{}", cursor + 1, total),
            (_, None) => format!("  {total} matches"),
        };
        spans.push(Span::styled(counter, Style::default().fg(Color::DarkGray)));
    }

    let title = if editing { "Search (editing)" } else { "Search" };
    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}
