//! TUI rendering and terminal management (impure shell).
//!
//! Owns the event loop: crossterm events are handled as they arrive, and
//! every poll-interval timeout the byte stream is drained and routed
//! through the monitor state. All state transitions stay in
//! [`crate::state`]; this module only translates terminal events into
//! commands and draws the result.

mod capture_pane;
mod layout;
mod search_bar;
mod status_bar;
mod tables;

pub use layout::{PaneAreas, UiSnapshot};
pub use status_bar::StatusInfo;

use crate::config::ResolvedConfig;
use crate::model::{Source, StreamError, ViewId};
use crate::state::MonitorState;
use crate::stream::LineStream;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations.
    #[error("terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Byte-stream error.
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),
}

/// Which part of the UI keyboard input goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    /// The tables; keys are commands.
    Tables,
    /// The search bar; keys edit the query.
    Search,
}

fn next_view(view: ViewId) -> ViewId {
    match view {
        ViewId::MasterData => ViewId::SlaveData,
        ViewId::SlaveData => ViewId::Timing,
        ViewId::Timing => ViewId::MasterData,
    }
}

/// Main TUI application.
///
/// Generic over the backend so rendering can be exercised against
/// `TestBackend`.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    monitor: MonitorState,
    stream: LineStream,
    config: ResolvedConfig,
    focus: Focus,
    focused_view: ViewId,
    notice: Option<String>,
    disconnected: bool,
    /// Whether the terminal reports key release events, making the
    /// capture toggles truly momentary. Without it they latch.
    momentary_toggles: bool,
    enhancement_pushed: bool,
    areas: Option<PaneAreas>,
    hovering: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Set up the terminal (raw mode, alternate screen, mouse capture,
    /// key-release reporting where available) and build the app.
    ///
    /// # Errors
    ///
    /// Terminal setup failures.
    pub fn new(stream: LineStream, config: ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            stdout.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let monitor = MonitorState::new(config.render_mode, config.auto_scroll);

        Ok(Self {
            terminal,
            monitor,
            stream,
            config,
            focus: Focus::Tables,
            focused_view: ViewId::MasterData,
            notice: None,
            disconnected: false,
            momentary_toggles: enhanced || cfg!(windows),
            enhancement_pushed: enhanced,
            areas: None,
            hovering: false,
        })
    }

    /// Undo the terminal setup. Best effort: failures here must not mask
    /// whatever ended the session.
    pub fn restore(&mut self) {
        if self.enhancement_pushed {
            let _ = io::stdout().execute(PopKeyboardEnhancementFlags);
        }
        let _ = io::stdout().execute(DisableMouseCapture);
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Run the event loop until the user quits.
    ///
    /// Every timeout of the poll interval the stream is drained; decoding
    /// and routing happen synchronously here, on this one thread.
    ///
    /// # Errors
    ///
    /// Terminal I/O failures. Stream failures do not end the loop; they
    /// are surfaced in the status bar once.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let tick = Duration::from_millis(self.config.poll_interval_ms);

        self.draw()?;
        loop {
            if event::poll(tick)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        self.draw()?;
                    }
                    Event::Resize(_, _) => self.draw()?,
                    _ => {}
                }
            } else if self.poll_stream() {
                self.draw()?;
            }
        }
    }

    /// Drain the byte stream and route new lines. Returns whether a
    /// redraw is needed.
    fn poll_stream(&mut self) -> bool {
        if self.disconnected {
            return false;
        }
        if !self.stream.is_open() {
            self.disconnected = true;
            let err = StreamError::Closed;
            self.notice = Some(format!("{err}; monitoring stopped"));
            warn!(%err, "byte stream lost");
            return true;
        }
        match self.stream.poll() {
            Ok(lines) if lines.is_empty() => false,
            Ok(lines) => {
                let appended = self.monitor.ingest_lines(&lines);
                debug!(
                    received = lines.len(),
                    appended, "ingested frame batch"
                );
                true
            }
            Err(err) => {
                self.disconnected = true;
                self.notice = Some(format!("stream error: {err}"));
                warn!(%err, "stream failed; monitoring stopped");
                true
            }
        }
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let Self {
            terminal,
            monitor,
            stream,
            focus,
            focused_view,
            notice,
            disconnected,
            areas,
            ..
        } = self;

        let ui = UiSnapshot {
            monitor,
            focused_view: *focused_view,
            search_editing: *focus == Focus::Search,
            status: StatusInfo {
                connected: !*disconnected,
                invalid_lines: stream.invalid_lines(),
                notice: notice.as_deref(),
            },
        };

        let mut drawn_areas = None;
        terminal.draw(|frame| {
            drawn_areas = Some(layout::render_layout(frame, &ui));
        })?;
        *areas = drawn_areas;
        Ok(())
    }

    /// Handle a keyboard event. Returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Capture toggles react to press AND release, so they are routed
        // before the release filter below.
        if self.focus == Focus::Tables {
            let source = match key.code {
                KeyCode::Char('m') => Some(Source::Master),
                KeyCode::Char('s') => Some(Source::Slave),
                _ => None,
            };
            if let Some(source) = source {
                self.handle_capture_key(source, key.kind);
                return false;
            }
        }

        if key.kind == KeyEventKind::Release {
            return false;
        }

        match self.focus {
            Focus::Search => {
                self.handle_search_key(key);
                false
            }
            Focus::Tables => self.handle_table_key(key),
        }
    }

    fn handle_capture_key(&mut self, source: Source, kind: KeyEventKind) {
        if self.momentary_toggles {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.monitor.set_capture_active(source, true);
                }
                KeyEventKind::Release => self.monitor.set_capture_active(source, false),
            }
        } else if kind == KeyEventKind::Press {
            // No release events from this terminal: latch instead.
            let held = self.monitor.filter().is_active(source);
            self.monitor.set_capture_active(source, !held);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::Tables,
            KeyCode::Backspace => {
                let mut query = self.monitor.query().to_string();
                query.pop();
                self.monitor.set_query(&query);
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut query = self.monitor.query().to_string();
                query.push(ch);
                self.monitor.set_query(&query);
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Tab => self.focused_view = next_view(self.focused_view),
            KeyCode::Char('n') => {
                self.monitor.search_next();
            }
            KeyCode::Char('p') => {
                self.monitor.search_prev();
            }
            KeyCode::Char('a') => {
                let enabled = !self.monitor.sync().auto_scroll();
                self.monitor.set_auto_scroll(enabled);
                if enabled {
                    if let Some(last) = self.monitor.row_count().checked_sub(1) {
                        self.monitor.scroll_to(self.focused_view, last);
                    }
                }
            }
            KeyCode::Char('r') => {
                let mode = self.monitor.render_mode().next();
                self.monitor.set_render_mode(mode);
            }
            KeyCode::Char('c') => self.monitor.clear_tables(),
            KeyCode::Char('x') => self.monitor.clear_capture(),
            KeyCode::Char('y') => self.send_selected_to_notepad(),
            KeyCode::Char('w') => self.save_notepad(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(self.table_page() as i64)),
            KeyCode::PageDown => self.scroll_by(self.table_page() as i64),
            KeyCode::Home => self.scroll_to_row(0),
            KeyCode::End => {
                if let Some(last) = self.monitor.row_count().checked_sub(1) {
                    self.scroll_to_row(last);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(areas) = self.areas else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let over = areas.over_data_view(mouse.column, mouse.row);
                if over != self.hovering {
                    self.hovering = over;
                    if over {
                        self.monitor.hover_enter();
                    } else {
                        self.monitor.hover_leave();
                    }
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(view) = areas.view_at(mouse.column, mouse.row) {
                    let delta = if mouse.kind == MouseEventKind::ScrollUp {
                        -3
                    } else {
                        3
                    };
                    self.scroll_view_by(view, delta);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(view) = areas.view_at(mouse.column, mouse.row) {
                    let area = areas.area_of(view);
                    let row = tables::row_at(
                        area,
                        self.monitor.sync().scroll_row(),
                        self.monitor.row_count(),
                        mouse.row,
                    );
                    if let Some(row) = row {
                        self.monitor.select_row(view, row);
                    }
                }
            }
            _ => {}
        }
    }

    fn scroll_by(&mut self, delta: i64) {
        self.scroll_view_by(self.focused_view, delta);
    }

    fn scroll_view_by(&mut self, view: ViewId, delta: i64) {
        let len = self.monitor.row_count();
        if len == 0 {
            return;
        }
        let current = self.monitor.sync().scroll_row() as i64;
        let target = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.monitor.scroll_to(view, target);
    }

    fn scroll_to_row(&mut self, row: usize) {
        if self.monitor.row_count() == 0 {
            return;
        }
        self.monitor.scroll_to(self.focused_view, row);
    }

    /// Page size of the focused table, for PageUp/PageDown.
    fn table_page(&self) -> usize {
        self.areas
            .map(|areas| tables::body_height(areas.area_of(self.focused_view)))
            .unwrap_or(10)
            .max(1)
    }

    fn send_selected_to_notepad(&mut self) {
        let Some(row) = self.monitor.sync().selected_row() else {
            return;
        };
        let line = match self.monitor.log().get(row) {
            Ok(frame) => format!("{}:{} {}", frame.source, frame.bit9, frame.data_hex),
            Err(_) => return,
        };
        self.monitor.notepad_append(&line);
        self.notice = Some("row sent to notepad".to_string());
    }

    fn save_notepad(&mut self) {
        match std::fs::write(&self.config.notepad_path, self.monitor.notepad()) {
            Ok(()) => {
                info!(path = %self.config.notepad_path.display(), "notepad saved");
                self.notice = Some(format!(
                    "notepad saved to {}",
                    self.config.notepad_path.display()
                ));
            }
            Err(err) => {
                warn!(%err, "notepad save failed");
                self.notice = Some(format!("notepad save failed: {err}"));
            }
        }
    }
}

/// Build the app around a line stream and run it to completion, restoring
/// the terminal afterwards even on error.
///
/// # Errors
///
/// Terminal setup or I/O failures.
pub fn run_with_stream(stream: LineStream, config: ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(stream, config)?;
    let result = app.run();
    app.restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_focus_cycles_through_all_tables() {
        let mut view = ViewId::MasterData;
        let mut seen = vec![view];
        for _ in 0..2 {
            view = next_view(view);
            seen.push(view);
        }
        assert_eq!(seen, ViewId::ALL.to_vec());
        assert_eq!(next_view(view), ViewId::MasterData);
    }
}
