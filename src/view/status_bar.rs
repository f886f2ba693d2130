//! One-line status bar.

use crate::model::Source;
use crate::state::MonitorState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the status bar reports besides the monitor state itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusInfo<'a> {
    /// Whether the byte stream can still deliver data.
    pub connected: bool,
    /// Lines dropped for invalid text encoding.
    pub invalid_lines: u64,
    /// A one-shot user-visible notice (stream loss, notepad save, ...).
    pub notice: Option<&'a str>,
}

fn toggle_indicator(monitor: &MonitorState, source: Source, label: &str) -> Span<'static> {
    if monitor.filter().is_active(source) {
        Span::styled(
            format!(" {label} "),
            Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
    }
}

/// Render the status line.
pub fn render_status_bar(frame: &mut Frame, area: Rect, monitor: &MonitorState, info: StatusInfo) {
    let mut spans = Vec::new();

    if info.connected {
        spans.push(Span::styled(
            " LIVE ",
            Style::default().bg(Color::Green).fg(Color::Black),
        ));
    } else {
        spans.push(Span::styled(
            " CLOSED ",
            Style::default().bg(Color::Red).fg(Color::White),
        ));
    }

    spans.push(Span::raw(format!(" frames {}", monitor.row_count())));
    spans.push(Span::raw(format!("  drops {}", monitor.decode_drops())));
    if info.invalid_lines > 0 {
        spans.push(Span::raw(format!("  bad-utf8 {}", info.invalid_lines)));
    }

    // The indicator shows the effective value, so a hover that suspends
    // auto-scroll is visible immediately.
    let auto = monitor.sync().effective_auto_scroll();
    let auto_label = match (auto, monitor.sync().hover_held()) {
        (false, true) => "  auto [paused]",
        (true, _) => "  auto [on]",
        (false, false) => "  auto [off]",
    };
    spans.push(Span::raw(auto_label.to_string()));

    spans.push(Span::raw(format!(
        "  mode {}",
        monitor.render_mode().name()
    )));

    spans.push(Span::raw("  "));
    spans.push(toggle_indicator(monitor, Source::Master, "M"));
    spans.push(toggle_indicator(monitor, Source::Slave, "S"));

    if let Some(notice) = info.notice {
        spans.push(Span::styled(
            format!("  {notice}"),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
