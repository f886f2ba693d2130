//! Byte-stream collaborators feeding the monitor.
//!
//! The serial device itself stays outside this crate: whatever produces
//! the frame lines is piped to stdin (live sniffing) or saved to a file
//! and replayed. Both sources expose the same non-blocking `poll`
//! interface so the event loop never stalls waiting for data.

use crate::model::StreamError;
use std::path::PathBuf;

pub mod replay;
pub mod stdin;

pub use replay::ReplayStream;
pub use stdin::StdinStream;

/// Unified line source for frame input.
#[derive(Debug)]
pub enum LineStream {
    /// Read-once replay of a captured frame dump.
    Replay(ReplayStream),
    /// Live piped input on stdin.
    Stdin(StdinStream),
}

impl LineStream {
    /// Poll for complete lines without blocking.
    ///
    /// Replay returns everything on the first call and nothing after;
    /// stdin returns whatever arrived since the last poll. Lines that are
    /// not valid UTF-8 have already been dropped and counted.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] for I/O failures on the underlying source.
    pub fn poll(&mut self) -> Result<Vec<String>, StreamError> {
        match self {
            LineStream::Replay(replay) => replay.poll(),
            LineStream::Stdin(stdin) => stdin.poll(),
        }
    }

    /// Whether more data can still arrive.
    ///
    /// A drained replay and a closed pipe both report `false`; the caller
    /// surfaces that once and stops polling.
    pub fn is_open(&self) -> bool {
        match self {
            LineStream::Replay(replay) => replay.is_open(),
            LineStream::Stdin(stdin) => stdin.is_open(),
        }
    }

    /// Lines dropped because their bytes were not valid text.
    pub fn invalid_lines(&self) -> u64 {
        match self {
            LineStream::Replay(replay) => replay.invalid_lines(),
            LineStream::Stdin(stdin) => stdin.invalid_lines(),
        }
    }
}

/// Pick the input source: a capture file when given, piped stdin otherwise.
///
/// # Errors
///
/// [`StreamError::FileNotFound`] for a missing capture file,
/// [`StreamError::NoInput`] when stdin is an interactive terminal.
pub fn detect_stream(file: Option<PathBuf>) -> Result<LineStream, StreamError> {
    match file {
        Some(path) => Ok(LineStream::Replay(ReplayStream::open(path)?)),
        None => Ok(LineStream::Stdin(StdinStream::new()?)),
    }
}
