//! Live line input from piped stdin.
//!
//! A background thread blocks on the pipe and hands complete lines over a
//! channel; `poll` drains the channel without ever blocking, which keeps
//! the event loop responsive when no data is arriving.

use crate::model::StreamError;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::warn;

/// Piped stdin as a non-blocking line source.
#[derive(Debug)]
pub struct StdinStream {
    rx: Receiver<Vec<u8>>,
    open: bool,
    invalid_lines: u64,
}

impl StdinStream {
    /// Attach to the process's stdin.
    ///
    /// # Errors
    ///
    /// [`StreamError::NoInput`] when stdin is an interactive terminal,
    /// which would otherwise leave the monitor waiting on keystrokes the
    /// TUI needs for itself.
    pub fn new() -> Result<Self, StreamError> {
        if std::io::stdin().is_terminal() {
            return Err(StreamError::NoInput);
        }
        Ok(Self::from_reader(std::io::stdin()))
    }

    /// Attach to any reader. Used by `new` and directly by tests.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut reader = BufReader::new(reader);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        if buf.last() != Some(&b'\n') {
                            // Unterminated tail at EOF: never a complete
                            // frame, drop it.
                            break;
                        }
                        while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
                            buf.pop();
                        }
                        if tx.send(std::mem::take(&mut buf)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            // Dropping `tx` here is what signals EOF to `poll`.
        });
        Self {
            rx,
            open: true,
            invalid_lines: 0,
        }
    }

    /// Drain every complete line that has arrived, without blocking.
    ///
    /// Lines whose bytes are not valid UTF-8 are dropped and counted;
    /// processing continues with the next line.
    ///
    /// # Errors
    ///
    /// Currently infallible (I/O failures end the reader thread, which
    /// shows up as the stream closing); the `Result` keeps the interface
    /// uniform with the replay source.
    pub fn poll(&mut self) -> Result<Vec<String>, StreamError> {
        let mut lines = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(line) => lines.push(line),
                    Err(_) => {
                        self.invalid_lines += 1;
                        warn!("dropped line with invalid UTF-8");
                    }
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.open = false;
                    break;
                }
            }
        }
        Ok(lines)
    }

    /// Whether the pipe can still deliver data.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Lines dropped for invalid text encoding.
    pub fn invalid_lines(&self) -> u64 {
        self.invalid_lines
    }
}
