//! Monitor state machine (pure).
//!
//! Everything in here is pure data plus transition functions; no I/O and
//! no rendering. The TUI shell reads this state and issues commands on it.

pub mod capture;
pub mod monitor;
pub mod search;
pub mod sync;
pub mod transaction_log;
pub mod views;

// Re-export for convenience
pub use capture::{CaptureFilter, CaptureLog, RenderMode};
pub use monitor::MonitorState;
pub use search::{Direction, SearchState};
pub use sync::{Propagation, SyncCoordinator};
pub use transaction_log::TransactionLog;
pub use views::{data_row, timing_row, DataRow, TimingRow};
