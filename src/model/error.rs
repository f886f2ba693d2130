//! Error types for busmon.
//!
//! Structured error taxonomy using `thiserror`. Decode-time failures are
//! recovered locally (the line is dropped and counted); only stream-level
//! failures propagate to the user-facing layer, and none of them abort the
//! poll loop.

use std::path::PathBuf;
use thiserror::Error;

/// Why a line failed to decode into a [`Frame`](crate::model::Frame).
///
/// Both variants are non-fatal: the caller drops the line, increments a
/// diagnostic counter, and continues with the next line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The line does not match the frame grammar.
    #[error("line does not match the frame grammar")]
    Mismatch,

    /// A numeric field exceeds the representable range for its width.
    /// Treated exactly like a grammar mismatch: the whole line is dropped.
    #[error("numeric field exceeds representable range")]
    FieldOverflow,
}

/// Contract violation: a row index past the end of the transaction log.
///
/// Fatal only to the calling operation, never to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("row {index} out of range for log of length {len}")]
pub struct RowOutOfRange {
    /// The requested row index.
    pub index: usize,
    /// Log length at the time of the request.
    pub len: usize,
}

/// Errors from the byte-stream collaborator.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The stream is closed or has errored. Surfaced once as a user-visible
    /// notice; the monitor transitions to a disconnected state and keeps
    /// displaying its last-consistent data.
    #[error("byte stream closed")]
    Closed,

    /// The capture file given for replay does not exist.
    #[error("capture file not found: {path}")]
    FileNotFound {
        /// Path that failed to open.
        path: PathBuf,
    },

    /// No input source: stdin is an interactive terminal and no capture
    /// file was given.
    #[error("no input: pass a capture file or pipe frames on stdin")]
    NoInput,

    /// Underlying I/O failure while reading the stream.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}
