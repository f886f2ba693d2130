//! Decoded bus transaction records.

use std::fmt;

/// Which bus role produced a frame.
///
/// The sniffer tags every transaction with the side of the bus that
/// transmitted it; routing to the data views keys off this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Frame transmitted by the bus master.
    Master,
    /// Frame transmitted by a bus slave.
    Slave,
}

impl Source {
    /// Wire-format name of the source, as it appears inside a frame line.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Master => "Master",
            Source::Slave => "Slave",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded bus transaction.
///
/// A `Frame` exists only for lines that matched the full frame grammar;
/// partial or garbled lines never produce one. All fields are immutable
/// once decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Bus role that transmitted the transaction.
    pub source: Source,
    /// 9th-bit address/flag field (protocol-specific, transmitted in decimal).
    pub bit9: u16,
    /// Raw hex payload as transmitted. Opaque: never reinterpreted numerically.
    pub data_hex: String,
    /// Source-specific timing offset, milliseconds.
    pub offset: u64,
    /// Secondary timing value, milliseconds.
    pub offset_x: u64,
    /// Frame timestamp, milliseconds.
    pub millis: u64,
}

/// One of the three row-aligned logical views.
///
/// Row index *i* names the same append event in every view, so scroll and
/// selection positions can be shared across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Data view holding master-sourced rows.
    MasterData,
    /// Data view holding slave-sourced rows.
    SlaveData,
    /// Timing view; receives a row for every frame regardless of source.
    Timing,
}

impl ViewId {
    /// All three views, in display order.
    pub const ALL: [ViewId; 3] = [ViewId::MasterData, ViewId::SlaveData, ViewId::Timing];

    /// The two views other than `self`.
    ///
    /// Scroll/selection events propagate to these; the originating view is
    /// excluded so it never receives its own event back.
    pub fn others(self) -> [ViewId; 2] {
        match self {
            ViewId::MasterData => [ViewId::SlaveData, ViewId::Timing],
            ViewId::SlaveData => [ViewId::MasterData, ViewId::Timing],
            ViewId::Timing => [ViewId::MasterData, ViewId::SlaveData],
        }
    }

    /// Whether this is one of the two data views (as opposed to Timing).
    pub fn is_data_view(self) -> bool {
        !matches!(self, ViewId::Timing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_display_matches_wire_names() {
        assert_eq!(Source::Master.to_string(), "Master");
        assert_eq!(Source::Slave.to_string(), "Slave");
    }

    #[test]
    fn others_excludes_self() {
        for view in ViewId::ALL {
            let others = view.others();
            assert_eq!(others.len(), 2);
            assert!(!others.contains(&view));
        }
    }

    #[test]
    fn timing_is_not_a_data_view() {
        assert!(ViewId::MasterData.is_data_view());
        assert!(ViewId::SlaveData.is_data_view());
        assert!(!ViewId::Timing.is_data_view());
    }
}
