//! Common test utilities shared across all test modules
//!
//! This module provides helper functions for building sample fixtures,
//! series and series sets used throughout the engine tests.

use chrono::{TimeZone, Utc};

use rigview::series::{Sample, Series, SeriesSet};

/// Build a sample at `secs` past the epoch with a deterministic id.
pub fn sample(tag: &str, secs: i64, value: f64) -> Sample {
    Sample {
        id: format!("{tag}-{secs}"),
        tag: tag.to_string(),
        timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
        value,
        tags_data_id: None,
    }
}

/// Build a series from (seconds, value) pairs.
pub fn series(tag: &str, points: &[(i64, f64)]) -> Series {
    Series::new(
        tag,
        points
            .iter()
            .map(|&(secs, value)| sample(tag, secs, value))
            .collect(),
    )
}

/// Build a series set from several (tag, points) entries, preserving order.
pub fn series_set(entries: &[(&str, &[(i64, f64)])]) -> SeriesSet {
    let mut set = SeriesSet::new();
    for &(tag, points) in entries {
        set.insert(series(tag, points));
    }
    set
}
