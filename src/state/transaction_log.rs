//! Append-only store of decoded frames.

use crate::model::{Frame, RowOutOfRange};

/// The session's transaction history, in arrival order.
///
/// This is the single source of truth the three logical views project
/// from. Within a session it only ever grows; `clear` starts a fresh
/// epoch with row indices counting from zero again. Individual frames are
/// never mutated or removed.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    frames: Vec<Frame>,
}

impl TransactionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame, returning the row index it was assigned.
    ///
    /// Row indices are dense: the n-th append of an epoch gets index n-1.
    pub fn append(&mut self, frame: Frame) -> usize {
        let row = self.frames.len();
        self.frames.push(frame);
        row
    }

    /// Drop every frame and restart row indexing at zero.
    ///
    /// Indices handed out before the clear must not be dereferenced
    /// afterwards; the coordinator resets scroll and selection for this
    /// reason.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Number of rows (equivalently, append events this epoch).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the log holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Look up the frame at `row`.
    ///
    /// # Errors
    ///
    /// Returns [`RowOutOfRange`] when `row >= len()`. This is a contract
    /// violation on the caller's side, fatal only to this operation.
    pub fn get(&self, row: usize) -> Result<&Frame, RowOutOfRange> {
        self.frames.get(row).ok_or(RowOutOfRange {
            index: row,
            len: self.frames.len(),
        })
    }

    /// Iterate frames in row order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "transaction_log_tests.rs"]
mod tests;
