//! busmon
//!
//! Live TUI monitor for a Master/Slave bus sniffer: decodes the frame
//! lines a sniffing device emits, routes them into three row-aligned
//! views (master data, slave data, shared timing), mirrors selected
//! frames into a searchable capture log, and keeps scroll and selection
//! synchronized across the views.
//!
//! The crate is split into a pure core (`model`, `parser`, `state`) and
//! an impure shell (`stream`, `view`); the shell owns all I/O and the
//! core owns every state transition.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod state;
pub mod stream;
pub mod view;
