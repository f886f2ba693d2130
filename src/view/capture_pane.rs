//! Capture log pane with search highlighting.
//!
//! Only the visible window of lines is styled on each draw; spans are
//! mapped to lines through the capture log's line-start index, so the
//! cost per frame is bounded by the viewport, not the log.

use crate::state::MonitorState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

fn match_style() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Black)
}

fn current_match_style() -> Style {
    Style::default()
        .bg(Color::Cyan)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// Render the capture pane.
///
/// The window follows the tail unless match navigation has pinned a
/// current match, in which case that match's line is kept in view.
pub fn render_capture_pane(frame: &mut Frame, area: Rect, monitor: &MonitorState) {
    let capture = monitor.capture();
    let height = area.height.saturating_sub(2) as usize; // borders
    let line_count = capture.line_count();

    let top = match monitor.current_span() {
        Some(span) => {
            let line = capture.line_of_offset(span.start);
            // Center the current match in the window.
            line.saturating_sub(height / 2).min(first_tail_line(line_count, height))
        }
        None => first_tail_line(line_count, height),
    };

    let current = monitor.current_span();
    let lines: Vec<Line> = (top..line_count.min(top + height))
        .map(|index| styled_line(monitor, index, current.clone()))
        .collect();

    let title = format!("Capture ({line_count})");
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// First visible line when the pane follows the tail.
fn first_tail_line(line_count: usize, height: usize) -> usize {
    line_count.saturating_sub(height)
}

/// Build one display line, splitting it around any highlight spans.
fn styled_line(monitor: &MonitorState, index: usize, current: Option<Range<usize>>) -> Line<'static> {
    let capture = monitor.capture();
    let Some(text) = capture.line(index) else {
        return Line::default();
    };
    let Some(line_start) = capture.line_start(index) else {
        return Line::default();
    };
    let line_end = line_start + text.len();

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut cursor = line_start;

    for span in spans_in_line(monitor.highlight_spans(), line_start, line_end) {
        let start = span.start.max(line_start);
        let end = span.end.min(line_end);
        if start > cursor {
            spans.push(Span::raw(text[cursor - line_start..start - line_start].to_string()));
        }
        let style = if current.as_ref() == Some(&span) {
            current_match_style()
        } else {
            match_style()
        };
        spans.push(Span::styled(
            text[start - line_start..end - line_start].to_string(),
            style,
        ));
        cursor = end;
    }

    if cursor < line_end {
        spans.push(Span::raw(text[cursor - line_start..].to_string()));
    }
    if spans.is_empty() {
        spans.push(Span::raw(text.to_string()));
    }

    Line::from(spans)
}

/// The highlight spans overlapping `[line_start, line_end)`, in order.
fn spans_in_line(
    matches: &[Range<usize>],
    line_start: usize,
    line_end: usize,
) -> Vec<Range<usize>> {
    // Matches are sorted by start; find the first that could overlap.
    let first = matches.partition_point(|m| m.end <= line_start);
    matches[first..]
        .iter()
        .take_while(|m| m.start < line_end)
        .cloned()
        .collect()
}
