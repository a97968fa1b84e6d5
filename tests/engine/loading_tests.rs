//! Tests for series loading through the source boundary
//!
//! Tests cover:
//! - Per-tag failure isolation
//! - Date-window filtering, normalization and decimation during load
//! - Tag ordering
//! - The deterministic mock source

use chrono::{TimeZone, Utc};

use rigview::downsample::{DateInterval, DecimationInterval};
use rigview::series::Sample;
use rigview::source::{load_series_set, MockSampleSource, SampleSource, SourceError};

use crate::common::sample;

/// Source that fails for selected tags and replays fixed samples otherwise.
struct ScriptedSource {
    failing_tags: Vec<String>,
    samples: Vec<Sample>,
}

impl SampleSource for ScriptedSource {
    fn fetch(
        &self,
        tag: &str,
        _window: &DateInterval,
        _interval: DecimationInterval,
    ) -> Result<Vec<Sample>, SourceError> {
        if self.failing_tags.iter().any(|t| t == tag) {
            return Err(SourceError::Status {
                status: 500,
                message: "HTTP 500".to_string(),
            });
        }
        Ok(self
            .samples
            .iter()
            .map(|s| Sample {
                tag: tag.to_string(),
                ..s.clone()
            })
            .collect())
    }
}

fn window(start_secs: i64, end_secs: i64) -> DateInterval {
    DateInterval::new(
        Utc.timestamp_opt(start_secs, 0).unwrap(),
        Utc.timestamp_opt(end_secs, 0).unwrap(),
    )
}

// ============================================
// Failure Isolation Tests
// ============================================

#[test]
fn test_failing_tag_yields_empty_series_only_for_itself() {
    let source = ScriptedSource {
        failing_tags: vec!["bad".to_string()],
        samples: (0..5).map(|i| sample("x", i * 120, i as f64)).collect(),
    };
    let tags = vec!["good".to_string(), "bad".to_string(), "other".to_string()];
    let set = load_series_set(&source, &tags, &window(0, 3600), DecimationInterval::OneMinute);

    assert_eq!(set.len(), 3);
    assert!(!set.get("good").unwrap().is_empty());
    assert!(set.get("bad").unwrap().is_empty());
    assert!(!set.get("other").unwrap().is_empty());
}

#[test]
fn test_all_tags_failing_still_produces_a_full_set() {
    let source = ScriptedSource {
        failing_tags: vec!["a".to_string(), "b".to_string()],
        samples: Vec::new(),
    };
    let tags = vec!["a".to_string(), "b".to_string()];
    let set = load_series_set(&source, &tags, &window(0, 3600), DecimationInterval::OneMinute);

    assert_eq!(set.len(), 2);
    assert!(set.first_non_empty().is_none());
}

// ============================================
// Load Pipeline Tests
// ============================================

#[test]
fn test_load_preserves_requested_tag_order() {
    let source = ScriptedSource {
        failing_tags: Vec::new(),
        samples: vec![sample("x", 0, 1.0)],
    };
    let tags = vec!["z".to_string(), "a".to_string(), "m".to_string()];
    let set = load_series_set(&source, &tags, &window(0, 3600), DecimationInterval::OneMinute);

    let order: Vec<&str> = set.tags().collect();
    assert_eq!(order, vec!["z", "a", "m"]);
}

#[test]
fn test_load_sorts_unordered_samples() {
    let source = ScriptedSource {
        failing_tags: Vec::new(),
        samples: vec![
            sample("x", 600, 3.0),
            sample("x", 0, 1.0),
            sample("x", 300, 2.0),
        ],
    };
    let tags = vec!["t".to_string()];
    let set = load_series_set(&source, &tags, &window(0, 3600), DecimationInterval::OneMinute);

    let series = set.get("t").unwrap();
    for pair in series.samples.windows(2) {
        assert!(pair[0].time_ms() <= pair[1].time_ms());
    }
}

#[test]
fn test_load_drops_samples_outside_the_window() {
    let source = ScriptedSource {
        failing_tags: Vec::new(),
        samples: vec![
            sample("x", -100, 0.0),
            sample("x", 60, 1.0),
            sample("x", 5000, 2.0),
        ],
    };
    let tags = vec!["t".to_string()];
    let set = load_series_set(&source, &tags, &window(0, 3600), DecimationInterval::OneMinute);

    let series = set.get("t").unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.samples[0].value, 1.0);
}

#[test]
fn test_load_decimates_with_first_and_last_retained() {
    // One sample every 2 minutes over an hour, thinned with a 10 minute gate
    let source = ScriptedSource {
        failing_tags: Vec::new(),
        samples: (0..=30).map(|i| sample("x", i * 120, i as f64)).collect(),
    };
    let tags = vec!["t".to_string()];
    let set = load_series_set(&source, &tags, &window(0, 3600), DecimationInterval::TenMinutes);

    let series = set.get("t").unwrap();
    assert_eq!(series.samples.first().unwrap().value, 0.0);
    assert_eq!(series.samples.last().unwrap().value, 30.0);
    // Every gap except the final one is at least the gate width
    for pair in series.samples.windows(2).take(series.len() - 2) {
        assert!(pair[1].time_ms() - pair[0].time_ms() >= 600_000);
    }
}

// ============================================
// Mock Source Tests
// ============================================

#[test]
fn test_mock_load_is_deterministic_and_ordered() {
    let source = MockSampleSource::default();
    let tags = vec!["DC_out_100ms[148]".to_string(), "MP_TripTank_Volume".to_string()];
    let w = window(0, 4 * 3600);

    let first = load_series_set(&source, &tags, &w, DecimationInterval::FiveMinutes);
    let second = load_series_set(&source, &tags, &w, DecimationInterval::FiveMinutes);

    assert_eq!(first.len(), 2);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.tag, b.tag);
        let va: Vec<f64> = a.values().collect();
        let vb: Vec<f64> = b.values().collect();
        assert_eq!(va, vb);
        for pair in a.samples.windows(2) {
            assert!(pair[0].time_ms() <= pair[1].time_ms());
        }
    }
}

#[test]
fn test_mock_load_respects_the_decimation_gate() {
    let source = MockSampleSource::default();
    let tags = vec!["t".to_string()];
    let set = load_series_set(
        &source,
        &tags,
        &window(0, 3600),
        DecimationInterval::FiveMinutes,
    );

    let series = set.get("t").unwrap();
    assert!(series.len() > 2);
    for pair in series.samples.windows(2).take(series.len() - 2) {
        assert!(pair[1].time_ms() - pair[0].time_ms() >= 300_000);
    }
}
