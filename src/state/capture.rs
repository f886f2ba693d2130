//! Capture filter and free-text capture log.
//!
//! While a per-source toggle is held, matching frames are rendered to one
//! text line each and appended to the capture log. The render mode is read
//! at emission time; switching it never rewrites lines already emitted.

use crate::model::{Frame, Source};

/// How a captured frame is rendered to text.
///
/// Exactly one mode is active at a time (radio-style selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// `[<millis>] <hex>` — timestamp-prefixed.
    Millis,
    /// `0x<hex>` — hex-prefixed.
    Hex,
    /// `<hex>` — payload only. The startup default.
    #[default]
    Plain,
    /// `[<Master|Slave>] <hex>` — source-prefixed.
    Source,
}

impl RenderMode {
    /// All modes, in selector order.
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Millis,
        RenderMode::Hex,
        RenderMode::Plain,
        RenderMode::Source,
    ];

    /// Stable name used in config files and on the CLI.
    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Millis => "millis",
            RenderMode::Hex => "hex",
            RenderMode::Plain => "plain",
            RenderMode::Source => "source",
        }
    }

    /// Parse a config/CLI name back into a mode.
    pub fn from_name(name: &str) -> Option<Self> {
        RenderMode::ALL.into_iter().find(|m| m.name() == name)
    }

    /// The next mode in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Millis => RenderMode::Hex,
            RenderMode::Hex => RenderMode::Plain,
            RenderMode::Plain => RenderMode::Source,
            RenderMode::Source => RenderMode::Millis,
        }
    }
}

/// Per-source momentary toggles plus the active render mode.
///
/// The toggles are held, not latched: they are true only between the
/// press and release events the UI forwards, so capture decisions depend
/// on what was held at the moment each frame arrived.
#[derive(Debug, Clone, Default)]
pub struct CaptureFilter {
    master_active: bool,
    slave_active: bool,
    mode: RenderMode,
}

impl CaptureFilter {
    /// Create a filter with both toggles released and the given mode.
    pub fn new(mode: RenderMode) -> Self {
        Self {
            master_active: false,
            slave_active: false,
            mode,
        }
    }

    /// Press or release the toggle for one source.
    pub fn set_active(&mut self, source: Source, active: bool) {
        match source {
            Source::Master => self.master_active = active,
            Source::Slave => self.slave_active = active,
        }
    }

    /// Whether the toggle for `source` is currently held.
    pub fn is_active(&self, source: Source) -> bool {
        match source {
            Source::Master => self.master_active,
            Source::Slave => self.slave_active,
        }
    }

    /// Whether a frame from `source` should be mirrored into the capture log.
    pub fn should_capture(&self, source: Source) -> bool {
        self.is_active(source)
    }

    /// Select the render mode used for frames emitted from now on.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// The currently selected render mode.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Render a frame to one capture line under the current mode.
    pub fn render(&self, frame: &Frame) -> String {
        match self.mode {
            RenderMode::Millis => format!("[{}] {}", frame.millis, frame.data_hex),
            RenderMode::Hex => format!("0x{}", frame.data_hex),
            RenderMode::Plain => frame.data_hex.clone(),
            RenderMode::Source => format!("[{}] {}", frame.source, frame.data_hex),
        }
    }
}

/// The capture log: rendered lines as one text buffer.
///
/// Owns the text the search index scans and the view displays. A
/// line-start index is maintained on append so byte spans from the search
/// can be mapped back to lines without rescanning the buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureLog {
    text: String,
    line_starts: Vec<usize>,
}

impl CaptureLog {
    /// Create an empty capture log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rendered line (a trailing newline is added).
    pub fn push_line(&mut self, line: &str) {
        self.line_starts.push(self.text.len());
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// The full rendered text, newline-separated.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of captured lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }

    /// The text of line `index`, without its trailing newline.
    pub fn line(&self, index: usize) -> Option<&str> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or_else(|| self.text.len().saturating_sub(1));
        self.text.get(start..end)
    }

    /// Byte offset where line `index` starts.
    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.line_starts.get(index).copied()
    }

    /// Index of the line containing byte `offset`.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Drop all captured text. Independent of the transaction log.
    pub fn clear(&mut self) {
        self.text.clear();
        self.line_starts.clear();
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
