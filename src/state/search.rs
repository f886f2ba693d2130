//! Incremental substring search over the capture text.
//!
//! Matching is case-sensitive exact substring, non-overlapping, spans
//! reported left to right as byte ranges into the capture text. The match
//! set is rebuilt from scratch whenever the query changes and extended
//! incrementally as capture text is appended, so the per-append cost is
//! bounded by the appended text rather than the whole log.

use std::ops::Range;

/// Navigation direction for match-to-match movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Move to the following match, wrapping past the end.
    Next,
    /// Move to the preceding match, wrapping past the start.
    Prev,
}

/// Current query, its match spans, and the navigation cursor.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    matches: Vec<Range<usize>>,
    cursor: Option<usize>,
    /// How many bytes of the subject text the match set covers.
    scanned: usize,
}

impl SearchState {
    /// Create an inactive search (empty query, no matches).
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and rebuild the match set over `text`.
    ///
    /// The cursor resets: the next `advance(Next)` lands on the first
    /// match. An empty query clears every span.
    pub fn set_query(&mut self, query: &str, text: &str) {
        self.query = query.to_string();
        self.recompute(text);
    }

    /// Rebuild the match set from scratch over `text`.
    pub fn recompute(&mut self, text: &str) {
        self.matches = find_all(&self.query, text);
        self.scanned = text.len();
        self.cursor = None;
    }

    /// Extend the match set after `text` grew by appending.
    ///
    /// Equivalent to `recompute` but only rescans the appended region
    /// (plus enough of the old tail to catch matches straddling the
    /// boundary). The cursor is preserved; existing spans never move
    /// because the subject is append-only.
    pub fn extend(&mut self, text: &str) {
        debug_assert!(text.len() >= self.scanned);
        if self.query.is_empty() {
            self.scanned = text.len();
            return;
        }
        // Resume where the previous greedy scan stopped: after the last
        // match, but no earlier than any position whose match could reach
        // into the appended region.
        let boundary = self.scanned.saturating_sub(self.query.len() - 1);
        let resume = self
            .matches
            .last()
            .map(|m| m.end.max(boundary))
            .unwrap_or(boundary);
        let mut from = resume.min(text.len());
        // Keep the resume point on a char boundary; spans only ever start
        // where the query itself starts, so nudging forward is safe.
        while from < text.len() && !text.is_char_boundary(from) {
            from += 1;
        }
        append_matches(&self.query, text, from, &mut self.matches);
        self.scanned = text.len();
    }

    /// Drop all matches and the cursor (subject text was cleared).
    pub fn reset(&mut self) {
        self.matches.clear();
        self.cursor = None;
        self.scanned = 0;
    }

    /// All match spans, leftmost first.
    pub fn matches(&self) -> &[Range<usize>] {
        &self.matches
    }

    /// Index of the match the cursor rests on, if navigation has started.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The span under the cursor.
    pub fn current(&self) -> Option<Range<usize>> {
        self.cursor.map(|i| self.matches[i].clone())
    }

    /// Move the cursor one match forward or back, wrapping around.
    ///
    /// Returns the span landed on, or `None` (and does nothing) when
    /// there are no matches.
    pub fn advance(&mut self, direction: Direction) -> Option<Range<usize>> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len();
        let next = match (self.cursor, direction) {
            (None, Direction::Next) => 0,
            (None, Direction::Prev) => len - 1,
            (Some(c), Direction::Next) => (c + 1) % len,
            (Some(c), Direction::Prev) => (c + len - 1) % len,
        };
        self.cursor = Some(next);
        Some(self.matches[next].clone())
    }
}

/// All non-overlapping occurrences of `query` in `text`, left to right.
pub fn find_all(query: &str, text: &str) -> Vec<Range<usize>> {
    let mut matches = Vec::new();
    append_matches(query, text, 0, &mut matches);
    matches
}

/// Greedy left-to-right scan of `text[from..]`, pushing spans onto `out`.
fn append_matches(query: &str, text: &str, mut from: usize, out: &mut Vec<Range<usize>>) {
    if query.is_empty() {
        return;
    }
    while let Some(pos) = text[from..].find(query) {
        let start = from + pos;
        let end = start + query.len();
        out.push(start..end);
        from = end;
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
