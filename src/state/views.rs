//! Row projections for the three logical views.
//!
//! The views never store rows of their own: every row is derived on
//! demand from the [`TransactionLog`](crate::state::TransactionLog)
//! frame at the same index. Because all three projections are total over
//! the log, each view has exactly as many rows as the log has frames and
//! row indices line up across views by construction.

use crate::model::{Frame, Source, ViewId};

/// One row of a data view (master or slave table).
///
/// Both cells are empty when the frame at this row came from the other
/// source; the row still exists to keep indices aligned with the other
/// views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataRow {
    /// 9th-bit field, present only when the frame belongs to this view.
    pub bit9: Option<u16>,
    /// Hex payload, present only when the frame belongs to this view.
    pub data_hex: Option<String>,
}

impl DataRow {
    /// Whether this row carries no content (frame belonged to the other source).
    pub fn is_blank(&self) -> bool {
        self.bit9.is_none() && self.data_hex.is_none()
    }
}

/// One row of the timing view.
///
/// `millis` and `offset_x` are filled for every frame; the per-source
/// offset lands in the column matching the frame's source and the other
/// column stays empty for that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRow {
    /// Frame timestamp, milliseconds.
    pub millis: u64,
    /// Secondary timing value, milliseconds.
    pub offset_x: u64,
    /// Master offset column; empty for slave-sourced rows.
    pub master_offset: Option<u64>,
    /// Slave offset column; empty for master-sourced rows.
    pub slave_offset: Option<u64>,
}

/// Project a frame onto a data view's row.
///
/// `view` must be one of the two data views; projecting onto
/// [`ViewId::Timing`] yields a blank row (the timing view has its own
/// projection).
pub fn data_row(frame: &Frame, view: ViewId) -> DataRow {
    let matches_view = matches!(
        (view, frame.source),
        (ViewId::MasterData, Source::Master) | (ViewId::SlaveData, Source::Slave)
    );
    if matches_view {
        DataRow {
            bit9: Some(frame.bit9),
            data_hex: Some(frame.data_hex.clone()),
        }
    } else {
        DataRow::default()
    }
}

/// Project a frame onto the timing view's row.
pub fn timing_row(frame: &Frame) -> TimingRow {
    let (master_offset, slave_offset) = match frame.source {
        Source::Master => (Some(frame.offset), None),
        Source::Slave => (None, Some(frame.offset)),
    };
    TimingRow {
        millis: frame.millis,
        offset_x: frame.offset_x,
        master_offset,
        slave_offset,
    }
}
