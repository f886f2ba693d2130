//! Tests for CaptureFilter and CaptureLog.

use super::*;

fn frame(source: Source, data_hex: &str, millis: u64) -> Frame {
    Frame {
        source,
        bit9: 1,
        data_hex: data_hex.to_string(),
        offset: 2,
        offset_x: 3,
        millis,
    }
}

// ===== CaptureFilter toggles =====

#[test]
fn toggles_start_released() {
    let filter = CaptureFilter::default();
    assert!(!filter.should_capture(Source::Master));
    assert!(!filter.should_capture(Source::Slave));
}

#[test]
fn held_toggle_captures_matching_source_only() {
    let mut filter = CaptureFilter::default();
    filter.set_active(Source::Master, true);

    assert!(filter.should_capture(Source::Master));
    assert!(!filter.should_capture(Source::Slave));
}

#[test]
fn releasing_toggle_stops_capture() {
    let mut filter = CaptureFilter::default();
    filter.set_active(Source::Slave, true);
    filter.set_active(Source::Slave, false);

    assert!(!filter.should_capture(Source::Slave));
}

#[test]
fn toggles_are_independent() {
    let mut filter = CaptureFilter::default();
    filter.set_active(Source::Master, true);
    filter.set_active(Source::Slave, true);
    filter.set_active(Source::Master, false);

    assert!(!filter.should_capture(Source::Master));
    assert!(filter.should_capture(Source::Slave));
}

// ===== Render modes =====

#[test]
fn plain_is_the_default_mode() {
    assert_eq!(RenderMode::default(), RenderMode::Plain);
}

#[test]
fn render_millis_mode() {
    let filter = CaptureFilter::new(RenderMode::Millis);
    assert_eq!(filter.render(&frame(Source::Master, "1A2B", 450)), "[450] 1A2B");
}

#[test]
fn render_hex_mode() {
    let filter = CaptureFilter::new(RenderMode::Hex);
    assert_eq!(filter.render(&frame(Source::Master, "1A2B", 450)), "0x1A2B");
}

#[test]
fn render_plain_mode() {
    let filter = CaptureFilter::new(RenderMode::Plain);
    assert_eq!(filter.render(&frame(Source::Slave, "FF", 100)), "FF");
}

#[test]
fn render_source_mode() {
    let filter = CaptureFilter::new(RenderMode::Source);
    assert_eq!(filter.render(&frame(Source::Slave, "FF", 100)), "[Slave] FF");
}

#[test]
fn mode_names_round_trip() {
    for mode in RenderMode::ALL {
        assert_eq!(RenderMode::from_name(mode.name()), Some(mode));
    }
    assert_eq!(RenderMode::from_name("bogus"), None);
}

#[test]
fn mode_cycle_visits_all_and_wraps() {
    let mut mode = RenderMode::Millis;
    let mut seen = vec![mode];
    for _ in 0..3 {
        mode = mode.next();
        seen.push(mode);
    }
    assert_eq!(seen, RenderMode::ALL.to_vec());
    assert_eq!(mode.next(), RenderMode::Millis);
}

// ===== CaptureLog =====

#[test]
fn push_line_appends_with_newline() {
    let mut log = CaptureLog::new();
    log.push_line("FF");
    log.push_line("0A");

    assert_eq!(log.text(), "FF\n0A\n");
    assert_eq!(log.line_count(), 2);
}

#[test]
fn line_returns_text_without_newline() {
    let mut log = CaptureLog::new();
    log.push_line("first");
    log.push_line("second");

    assert_eq!(log.line(0), Some("first"));
    assert_eq!(log.line(1), Some("second"));
    assert_eq!(log.line(2), None);
}

#[test]
fn line_of_offset_maps_span_starts_to_lines() {
    let mut log = CaptureLog::new();
    log.push_line("abc"); // bytes 0..4 including newline
    log.push_line("defg"); // bytes 4..9

    assert_eq!(log.line_of_offset(0), 0);
    assert_eq!(log.line_of_offset(2), 0);
    assert_eq!(log.line_of_offset(4), 1);
    assert_eq!(log.line_of_offset(8), 1);
}

#[test]
fn clear_empties_text_and_index() {
    let mut log = CaptureLog::new();
    log.push_line("FF");
    log.clear();

    assert!(log.is_empty());
    assert_eq!(log.text(), "");
    assert_eq!(log.line_count(), 0);
}
