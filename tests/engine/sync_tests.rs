//! Tests for synchronized cross-series hover lookup
//!
//! Tests cover:
//! - Snapping to the reference series
//! - The five-minute readout tolerance
//! - Cursor placement in both chart modes
//! - Readout ordering and formatting

use std::collections::HashMap;

use rigview::engine::{render_combined, render_separate, CombinedLayout};
use rigview::series::TagLimits;
use rigview::sync::{hover_readout, HoverCursor, SYNC_TOLERANCE_MS};

use crate::common::series_set;

// ============================================
// Snapping Tests
// ============================================

#[test]
fn test_snap_uses_first_non_empty_series_as_reference() {
    let set = series_set(&[
        ("empty", &[]),
        ("ref", &[(0, 1.0), (100, 2.0)]),
        ("other", &[(40, 3.0)]),
    ]);
    // 55 s is nearer to the reference's sample at 100 s than at 0 s
    let readout = hover_readout(&set, 55_000).unwrap();
    assert_eq!(readout.snapped_ms, 100_000);
}

#[test]
fn test_hover_readout_none_when_everything_is_empty() {
    let set = series_set(&[("a", &[]), ("b", &[])]);
    assert!(hover_readout(&set, 0).is_none());
}

// ============================================
// Tolerance Tests
// ============================================

#[test]
fn test_series_beyond_five_minutes_is_absent() {
    let set = series_set(&[
        ("ref", &[(0, 1.0)]),
        // Nearest sample 301 s away from the snapped instant
        ("far", &[(301, 9.0)]),
    ]);
    let readout = hover_readout(&set, 0).unwrap();
    assert_eq!(readout.entries[0].value, Some(1.0));
    assert_eq!(readout.entries[1].value, None);
    assert_eq!(readout.entries[1].display_value(), "—");
}

#[test]
fn test_sample_at_exact_snapped_time_reads_its_value() {
    let set = series_set(&[
        ("ref", &[(0, 1.0), (60, 2.0)]),
        ("synced", &[(60, 7.5)]),
    ]);
    let readout = hover_readout(&set, 60_000).unwrap();
    assert_eq!(readout.snapped_ms, 60_000);
    assert_eq!(readout.entries[1].value, Some(7.5));
}

#[test]
fn test_tolerance_boundary_is_inclusive() {
    let set = series_set(&[
        ("ref", &[(0, 1.0)]),
        ("edge", &[(SYNC_TOLERANCE_MS / 1000, 3.0)]),
    ]);
    let readout = hover_readout(&set, 0).unwrap();
    assert_eq!(readout.entries[1].value, Some(3.0));
}

#[test]
fn test_readout_entries_follow_set_order() {
    let set = series_set(&[("z", &[(0, 1.0)]), ("a", &[(0, 2.0)]), ("m", &[(0, 3.0)])]);
    let readout = hover_readout(&set, 0).unwrap();
    let tags: Vec<&str> = readout.entries.iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["z", "a", "m"]);
}

// ============================================
// Cursor Placement Tests
// ============================================

#[test]
fn test_combined_cursor_sits_at_time_scale_position() {
    let set = series_set(&[("a", &[(0, 1.0), (100, 2.0)])]);
    let mut cursor = HoverCursor::new();
    cursor.update(&set, 90_000);

    let frame = render_combined(
        &set,
        &HashMap::new(),
        (1200.0, 500.0),
        CombinedLayout::Shared,
        &cursor,
    );
    let line = frame.cursor.unwrap();
    assert_eq!(line.snapped_ms, 100_000);
    // Snapped instant is the right edge of a 980 px plot
    assert!((line.x - 980.0).abs() < 1e-9);
}

#[test]
fn test_separate_cursor_snaps_to_own_sample_rank() {
    let set = series_set(&[("dc", &[(0, 1.0), (60, 2.0), (120, 3.0)])]);
    let mut cursor = HoverCursor::new();
    cursor.update(&set, 55_000);

    let frame = render_separate(
        &set,
        "dc",
        &TagLimits::unbounded(),
        0,
        (1000.0, 500.0),
        &cursor,
    );
    let line = frame.cursor.unwrap();
    assert_eq!(line.snapped_ms, 60_000);
    // Rank 1 of 3 on an 860 px plot
    assert!((line.x - 430.0).abs() < 1e-9);
}

#[test]
fn test_one_cursor_synchronizes_every_chart() {
    // The same cursor drives both the combined frame and each separate
    // chart, so every readout agrees on the snapped instant.
    let set = series_set(&[
        ("a", &[(0, 1.0), (60, 2.0)]),
        ("b", &[(58, 10.0), (120, 20.0)]),
    ]);
    let mut cursor = HoverCursor::new();
    cursor.update(&set, 50_000);

    let combined = render_combined(
        &set,
        &HashMap::new(),
        (1200.0, 500.0),
        CombinedLayout::Shared,
        &cursor,
    );
    let separate = render_separate(
        &set,
        "b",
        &TagLimits::unbounded(),
        1,
        (1000.0, 500.0),
        &cursor,
    );

    let combined_readout = combined.readout.unwrap();
    let separate_readout = separate.readout.unwrap();
    assert_eq!(combined_readout.snapped_ms, 60_000);
    assert_eq!(separate_readout.snapped_ms, 60_000);
    // "b" contributes its 58 s sample in both readouts
    assert_eq!(combined_readout.entries[1].value, Some(10.0));
    assert_eq!(separate_readout.entries[1].value, Some(10.0));
}

#[test]
fn test_cleared_cursor_leaves_no_cursor_or_readout() {
    let set = series_set(&[("a", &[(0, 1.0)])]);
    let mut cursor = HoverCursor::new();
    cursor.update(&set, 0);
    cursor.clear();

    let frame = render_combined(
        &set,
        &HashMap::new(),
        (1200.0, 500.0),
        CombinedLayout::Shared,
        &cursor,
    );
    assert!(frame.cursor.is_none());
    assert!(frame.readout.is_none());
}
