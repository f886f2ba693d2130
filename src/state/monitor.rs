//! Root monitor state and its command surface.
//!
//! `MonitorState` owns the transaction log, capture log, search index and
//! the sync coordinator, and exposes the operations the UI shell calls:
//! line ingestion, clears, toggles, search and scroll/selection routing.
//! All of it runs on the single event-loop thread; nothing in here locks
//! or blocks.

use std::ops::Range;

use tracing::debug;

use crate::model::{RowOutOfRange, Source, ViewId};
use crate::parser;
use crate::state::capture::{CaptureFilter, CaptureLog, RenderMode};
use crate::state::search::{Direction, SearchState};
use crate::state::sync::{Propagation, SyncCoordinator};
use crate::state::transaction_log::TransactionLog;
use crate::state::views::{data_row, timing_row, DataRow, TimingRow};

/// The whole decoded-side state of one monitoring session.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    log: TransactionLog,
    filter: CaptureFilter,
    capture: CaptureLog,
    search: SearchState,
    sync: SyncCoordinator,
    notepad: String,
    decode_drops: u64,
}

impl MonitorState {
    /// Create a session with the given startup render mode and auto-scroll
    /// setting.
    pub fn new(mode: RenderMode, auto_scroll: bool) -> Self {
        Self {
            filter: CaptureFilter::new(mode),
            sync: SyncCoordinator::new(auto_scroll),
            ..Self::default()
        }
    }

    // ===== Ingestion =====

    /// Decode one raw line and route the resulting frame.
    ///
    /// Returns the assigned row index, or `None` when the line did not
    /// decode (it is counted and logged, never surfaced as an error).
    /// Capture emission happens with the toggles and render mode as they
    /// are at this moment; later changes never rewrite what was emitted.
    pub fn ingest_line(&mut self, line: &str) -> Option<usize> {
        let frame = match parser::decode(line) {
            Ok(frame) => frame,
            Err(err) => {
                self.decode_drops += 1;
                debug!(%err, line, "dropped undecodable line");
                return None;
            }
        };

        if self.filter.should_capture(frame.source) {
            let rendered = self.filter.render(&frame);
            self.capture.push_line(&rendered);
            self.search.extend(self.capture.text());
        }

        let row = self.log.append(frame);
        if self.sync.effective_auto_scroll() {
            self.sync.follow(row);
        }
        Some(row)
    }

    /// Ingest a batch of lines, returning how many frames were appended.
    pub fn ingest_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> usize {
        lines
            .iter()
            .filter(|line| self.ingest_line(line.as_ref()).is_some())
            .count()
    }

    // ===== Log and view access =====

    /// The underlying transaction log.
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Rows currently in every view (they are always equal in length).
    pub fn row_count(&self) -> usize {
        self.log.len()
    }

    /// Row `row` of one of the two data views.
    ///
    /// # Errors
    ///
    /// [`RowOutOfRange`] when `row` is past the end of the log.
    pub fn data_row(&self, view: ViewId, row: usize) -> Result<DataRow, RowOutOfRange> {
        Ok(data_row(self.log.get(row)?, view))
    }

    /// Row `row` of the timing view.
    ///
    /// # Errors
    ///
    /// [`RowOutOfRange`] when `row` is past the end of the log.
    pub fn timing_row(&self, row: usize) -> Result<TimingRow, RowOutOfRange> {
        Ok(timing_row(self.log.get(row)?))
    }

    /// Lines dropped because they did not decode.
    pub fn decode_drops(&self) -> u64 {
        self.decode_drops
    }

    // ===== Clears =====

    /// Empty all three tables and restart row indexing.
    ///
    /// Scroll and selection reset with the log so no index from the old
    /// epoch is ever dereferenced. The capture log is untouched.
    pub fn clear_tables(&mut self) {
        self.log.clear();
        self.sync.reset_position();
    }

    /// Empty the capture log. Independent of the tables.
    pub fn clear_capture(&mut self) {
        self.capture.clear();
        self.search.reset();
    }

    // ===== Capture =====

    /// The capture log (rendered text plus line index).
    pub fn capture(&self) -> &CaptureLog {
        &self.capture
    }

    /// The capture filter (toggle and mode state, for display).
    pub fn filter(&self) -> &CaptureFilter {
        &self.filter
    }

    /// Press (`true`) or release (`false`) the capture toggle for a source.
    pub fn set_capture_active(&mut self, source: Source, active: bool) {
        self.filter.set_active(source, active);
    }

    /// Select the render mode for entries emitted from now on.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.filter.set_mode(mode);
    }

    /// The active render mode.
    pub fn render_mode(&self) -> RenderMode {
        self.filter.mode()
    }

    // ===== Search =====

    /// Replace the search query and recompute matches over the capture text.
    pub fn set_query(&mut self, query: &str) {
        self.search.set_query(query, self.capture.text());
    }

    /// The current search query.
    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// All highlight spans (byte ranges into the capture text).
    pub fn highlight_spans(&self) -> &[Range<usize>] {
        self.search.matches()
    }

    /// The span under the search cursor, if navigation has started.
    pub fn current_span(&self) -> Option<Range<usize>> {
        self.search.current()
    }

    /// Index of the current match (for "n/total" display).
    pub fn match_cursor(&self) -> Option<usize> {
        self.search.cursor()
    }

    /// Jump to the next match, wrapping. `None` when there are no matches.
    pub fn search_next(&mut self) -> Option<Range<usize>> {
        self.search.advance(Direction::Next)
    }

    /// Jump to the previous match, wrapping. `None` when there are no matches.
    pub fn search_prev(&mut self) -> Option<Range<usize>> {
        self.search.advance(Direction::Prev)
    }

    // ===== Scroll / selection / auto-scroll =====

    /// Shared scroll and selection state.
    pub fn sync(&self) -> &SyncCoordinator {
        &self.sync
    }

    /// Route a scroll event from `origin` to the other two views.
    pub fn scroll_to(&mut self, origin: ViewId, row: usize) -> Propagation {
        self.sync.scroll_from(origin, row)
    }

    /// Route a selection event from `origin` to the other two views.
    pub fn select_row(&mut self, origin: ViewId, row: usize) -> Propagation {
        self.sync.select_from(origin, row)
    }

    /// Set the persistent auto-scroll flag.
    pub fn set_auto_scroll(&mut self, on: bool) {
        self.sync.set_auto_scroll(on);
    }

    /// Pointer entered a data view.
    pub fn hover_enter(&mut self) {
        self.sync.hover_enter();
    }

    /// Pointer left the data views.
    pub fn hover_leave(&mut self) {
        self.sync.hover_leave();
    }

    // ===== Notepad =====

    /// The free-text notepad buffer (saved verbatim on user request).
    pub fn notepad(&self) -> &str {
        &self.notepad
    }

    /// Append one line to the notepad buffer.
    pub fn notepad_append(&mut self, text: &str) {
        self.notepad.push_str(text);
        self.notepad.push('\n');
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
