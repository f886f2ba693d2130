//! Read-once replay of a captured frame dump.

use crate::model::StreamError;
use std::path::PathBuf;
use tracing::warn;

/// A capture file loaded whole and delivered on the first poll.
///
/// After the single delivery the stream reports closed, which the monitor
/// shows the same way as a live stream ending.
#[derive(Debug)]
pub struct ReplayStream {
    pending: Vec<String>,
    drained: bool,
    invalid_lines: u64,
}

impl ReplayStream {
    /// Load `path`, splitting it into lines and dropping (with a count)
    /// any line that is not valid UTF-8.
    ///
    /// # Errors
    ///
    /// [`StreamError::FileNotFound`] when the file does not exist,
    /// [`StreamError::Io`] for other read failures.
    pub fn open(path: PathBuf) -> Result<Self, StreamError> {
        if !path.exists() {
            return Err(StreamError::FileNotFound { path });
        }
        let bytes = std::fs::read(&path)?;

        let mut pending = Vec::new();
        let mut invalid_lines = 0;
        for raw in bytes.split(|&b| b == b'\n') {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.is_empty() {
                continue;
            }
            match std::str::from_utf8(raw) {
                Ok(line) => pending.push(line.to_string()),
                Err(_) => {
                    invalid_lines += 1;
                    warn!(path = %path.display(), "dropped capture line with invalid UTF-8");
                }
            }
        }

        Ok(Self {
            pending,
            drained: false,
            invalid_lines,
        })
    }

    /// First call returns every line of the file; later calls return
    /// nothing.
    ///
    /// # Errors
    ///
    /// Infallible after `open`; the `Result` mirrors the live source.
    pub fn poll(&mut self) -> Result<Vec<String>, StreamError> {
        self.drained = true;
        Ok(std::mem::take(&mut self.pending))
    }

    /// Open until the one-shot delivery has happened.
    pub fn is_open(&self) -> bool {
        !self.drained
    }

    /// Lines dropped for invalid text encoding.
    pub fn invalid_lines(&self) -> u64 {
        self.invalid_lines
    }
}
