//! The three row-aligned tables.
//!
//! All tables window their rows identically from the shared scroll
//! position, so the same physical screen row shows the same logical row
//! index in every table.

use crate::model::ViewId;
use crate::state::MonitorState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Rows of vertical chrome a table spends on borders and its header.
const TABLE_CHROME: u16 = 3;

/// First visible row for a viewport of `height` body rows anchored so
/// that `scroll_row` is on screen (at the bottom when there is enough
/// history above it).
pub fn visible_top(scroll_row: usize, height: usize) -> usize {
    scroll_row.saturating_sub(height.saturating_sub(1))
}

/// Number of body rows a table of `area` can show.
pub fn body_height(area: Rect) -> usize {
    area.height.saturating_sub(TABLE_CHROME) as usize
}

/// Map a screen `y` inside `area` back to a logical row index.
///
/// `None` when `y` is on the chrome or past the last row.
pub fn row_at(area: Rect, scroll_row: usize, len: usize, y: u16) -> Option<usize> {
    let body_top = area.y + 2; // top border + header
    let height = body_height(area);
    if height == 0 || y < body_top || y >= body_top + height as u16 {
        return None;
    }
    let row = visible_top(scroll_row, height) + (y - body_top) as usize;
    (row < len).then_some(row)
}

fn table_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

fn selected_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell<'static> {
    match value {
        Some(v) => Cell::from(v.to_string()),
        None => Cell::from(""),
    }
}

/// Render one of the two data tables.
pub fn render_data_table(
    frame: &mut Frame,
    area: Rect,
    monitor: &MonitorState,
    view: ViewId,
    focused: bool,
) {
    debug_assert!(view.is_data_view());
    let title = match view {
        ViewId::MasterData => "Master",
        _ => "Slave",
    };

    let len = monitor.row_count();
    let height = body_height(area);
    let top = visible_top(monitor.sync().scroll_row(), height);
    let selected = monitor.sync().selected_row();

    let rows = (top..len.min(top + height)).map(|row| {
        // Projection is total over the log; the range above stays in bounds.
        let data = monitor.data_row(view, row).unwrap_or_default();
        let styled = Row::new(vec![optional_cell(data.bit9), optional_cell(data.data_hex)]);
        if selected == Some(row) {
            styled.style(selected_style())
        } else {
            styled
        }
    });

    let table = Table::new(
        rows,
        [
            ratatui::layout::Constraint::Length(6),
            ratatui::layout::Constraint::Min(4),
        ],
    )
    .header(Row::new(vec!["Bit9", "Data"]).style(header_style()))
    .block(table_block(title, focused));

    frame.render_widget(table, area);
}

/// Render the timing table.
pub fn render_timing_table(frame: &mut Frame, area: Rect, monitor: &MonitorState, focused: bool) {
    let len = monitor.row_count();
    let height = body_height(area);
    let top = visible_top(monitor.sync().scroll_row(), height);
    let selected = monitor.sync().selected_row();

    let rows = (top..len.min(top + height)).filter_map(|row| {
        let timing = monitor.timing_row(row).ok()?;
        let styled = Row::new(vec![
            Cell::from(timing.millis.to_string()),
            Cell::from(timing.offset_x.to_string()),
            optional_cell(timing.master_offset),
            optional_cell(timing.slave_offset),
        ]);
        Some(if selected == Some(row) {
            styled.style(selected_style())
        } else {
            styled
        })
    });

    let table = Table::new(
        rows,
        [
            ratatui::layout::Constraint::Length(8),
            ratatui::layout::Constraint::Length(8),
            ratatui::layout::Constraint::Length(7),
            ratatui::layout::Constraint::Length(7),
        ],
    )
    .header(Row::new(vec!["Millis", "OffsetX", "Master", "Slave"]).style(header_style()))
    .block(table_block("Timing", focused));

    frame.render_widget(table, area);
}
