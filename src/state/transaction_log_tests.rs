//! Tests for TransactionLog.

use super::*;
use crate::model::Source;

fn frame(source: Source, millis: u64) -> Frame {
    Frame {
        source,
        bit9: 1,
        data_hex: "AB".to_string(),
        offset: 2,
        offset_x: 3,
        millis,
    }
}

#[test]
fn append_assigns_dense_row_indices() {
    let mut log = TransactionLog::new();

    assert_eq!(log.append(frame(Source::Master, 1)), 0);
    assert_eq!(log.append(frame(Source::Slave, 2)), 1);
    assert_eq!(log.append(frame(Source::Master, 3)), 2);
    assert_eq!(log.len(), 3);
}

#[test]
fn get_returns_appended_frame() {
    let mut log = TransactionLog::new();
    log.append(frame(Source::Slave, 42));

    let stored = log.get(0).expect("row 0 exists");
    assert_eq!(stored.source, Source::Slave);
    assert_eq!(stored.millis, 42);
}

#[test]
fn get_out_of_range_reports_index_and_len() {
    let mut log = TransactionLog::new();
    log.append(frame(Source::Master, 1));

    let err = log.get(5).expect_err("row 5 does not exist");
    assert_eq!(err.index, 5);
    assert_eq!(err.len, 1);
}

#[test]
fn get_on_empty_log_is_out_of_range() {
    let log = TransactionLog::new();
    assert!(log.get(0).is_err());
}

#[test]
fn clear_resets_length_and_indexing() {
    let mut log = TransactionLog::new();
    log.append(frame(Source::Master, 1));
    log.append(frame(Source::Slave, 2));

    log.clear();

    assert_eq!(log.len(), 0);
    assert!(log.is_empty());
    // A fresh epoch counts from zero again.
    assert_eq!(log.append(frame(Source::Master, 3)), 0);
}

#[test]
fn stale_index_after_clear_is_rejected() {
    let mut log = TransactionLog::new();
    log.append(frame(Source::Master, 1));
    log.append(frame(Source::Master, 2));
    log.clear();
    log.append(frame(Source::Slave, 3));

    // Row 1 was valid last epoch but must not resolve now.
    assert!(log.get(1).is_err());
}

#[test]
fn iter_preserves_arrival_order() {
    let mut log = TransactionLog::new();
    log.append(frame(Source::Master, 10));
    log.append(frame(Source::Slave, 20));

    let millis: Vec<u64> = log.iter().map(|f| f.millis).collect();
    assert_eq!(millis, vec![10, 20]);
}
