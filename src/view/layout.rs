//! Whole-screen layout.
//!
//! Splits the terminal into the three tables, the search bar, the capture
//! pane and the status line, and reports where the tables landed so the
//! event loop can hit-test mouse positions against them.

use crate::model::ViewId;
use crate::state::MonitorState;
use crate::view::status_bar::StatusInfo;
use crate::view::{capture_pane, search_bar, status_bar, tables};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Screen regions the three tables were rendered into, for mouse
/// hit-testing. Refreshed on every draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAreas {
    /// Master data table.
    pub master: Rect,
    /// Slave data table.
    pub slave: Rect,
    /// Timing table.
    pub timing: Rect,
    /// Capture pane.
    pub capture: Rect,
}

impl PaneAreas {
    /// Which table, if any, contains the screen position.
    pub fn view_at(&self, x: u16, y: u16) -> Option<ViewId> {
        let pos = ratatui::layout::Position::new(x, y);
        if self.master.contains(pos) {
            Some(ViewId::MasterData)
        } else if self.slave.contains(pos) {
            Some(ViewId::SlaveData)
        } else if self.timing.contains(pos) {
            Some(ViewId::Timing)
        } else {
            None
        }
    }

    /// Whether the position is over one of the two data tables.
    ///
    /// Hover over a data view is what suspends auto-scroll.
    pub fn over_data_view(&self, x: u16, y: u16) -> bool {
        matches!(
            self.view_at(x, y),
            Some(ViewId::MasterData) | Some(ViewId::SlaveData)
        )
    }

    /// The rendered area of one table.
    pub fn area_of(&self, view: ViewId) -> Rect {
        match view {
            ViewId::MasterData => self.master,
            ViewId::SlaveData => self.slave,
            ViewId::Timing => self.timing,
        }
    }
}

/// What the renderer needs besides the monitor state itself.
#[derive(Debug, Clone, Copy)]
pub struct UiSnapshot<'a> {
    /// The monitor state to draw.
    pub monitor: &'a MonitorState,
    /// Table that keyboard scrolling originates in.
    pub focused_view: ViewId,
    /// Whether the search bar is in editing mode.
    pub search_editing: bool,
    /// Status line extras.
    pub status: StatusInfo<'a>,
}

/// Render the full screen, returning the table areas for hit-testing.
pub fn render_layout(frame: &mut Frame, ui: &UiSnapshot) -> PaneAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // tables
            Constraint::Length(3), // search bar
            Constraint::Length(8), // capture pane
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    let tables_area = vertical[0];
    let search_area = vertical[1];
    let capture_area = vertical[2];
    let status_area = vertical[3];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(tables_area);

    let areas = PaneAreas {
        master: columns[0],
        slave: columns[1],
        timing: columns[2],
        capture: capture_area,
    };

    tables::render_data_table(
        frame,
        areas.master,
        ui.monitor,
        ViewId::MasterData,
        ui.focused_view == ViewId::MasterData,
    );
    tables::render_data_table(
        frame,
        areas.slave,
        ui.monitor,
        ViewId::SlaveData,
        ui.focused_view == ViewId::SlaveData,
    );
    tables::render_timing_table(
        frame,
        areas.timing,
        ui.monitor,
        ui.focused_view == ViewId::Timing,
    );

    search_bar::render_search_bar(frame, search_area, ui.monitor, ui.search_editing);
    capture_pane::render_capture_pane(frame, capture_area, ui.monitor);
    status_bar::render_status_bar(frame, status_area, ui.monitor, ui.status);

    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn populated_monitor() -> MonitorState {
        let mut monitor = MonitorState::default();
        monitor.set_capture_active(Source::Slave, true);
        monitor.ingest_lines(&[
            "[Slave:2 FF:5ms:1ms:100ms]",
            "[Master:7 0A:9ms:2ms:101ms]",
            "[Slave:3 AB:6ms:1ms:102ms]",
        ]);
        monitor.set_query("FF");
        monitor
    }

    fn snapshot(monitor: &MonitorState) -> UiSnapshot<'_> {
        UiSnapshot {
            monitor,
            focused_view: ViewId::Timing,
            search_editing: false,
            status: StatusInfo {
                connected: true,
                invalid_lines: 0,
                notice: None,
            },
        }
    }

    #[test]
    fn renders_without_panic_on_small_terminal() {
        let monitor = populated_monitor();
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| {
                render_layout(frame, &snapshot(&monitor));
            })
            .unwrap();
    }

    #[test]
    fn renders_empty_monitor() {
        let monitor = MonitorState::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                render_layout(frame, &snapshot(&monitor));
            })
            .unwrap();
    }

    #[test]
    fn table_areas_cover_distinct_columns() {
        let monitor = populated_monitor();
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let mut areas = None;
        terminal
            .draw(|frame| {
                areas = Some(render_layout(frame, &snapshot(&monitor)));
            })
            .unwrap();

        let areas = areas.unwrap();
        assert!(areas.master.width > 0);
        assert_eq!(areas.view_at(areas.master.x, areas.master.y), Some(ViewId::MasterData));
        assert_eq!(areas.view_at(areas.slave.x, areas.slave.y), Some(ViewId::SlaveData));
        assert_eq!(areas.view_at(areas.timing.x, areas.timing.y), Some(ViewId::Timing));
        assert!(areas.over_data_view(areas.master.x, areas.master.y));
        assert!(!areas.over_data_view(areas.timing.x, areas.timing.y));
    }

    #[test]
    fn renders_disconnected_notice() {
        let monitor = MonitorState::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let ui = UiSnapshot {
            monitor: &monitor,
            focused_view: ViewId::MasterData,
            search_editing: true,
            status: StatusInfo {
                connected: false,
                invalid_lines: 2,
                notice: Some("byte stream closed"),
            },
        };
        terminal
            .draw(|frame| {
                render_layout(frame, &ui);
            })
            .unwrap();
    }
}
