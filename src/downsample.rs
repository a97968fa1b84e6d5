//! Display decimation: time-gated thinning of a series, plus the date-window
//! filter applied before it.
//!
//! Thinning is purely time-gated. It keeps the first sample, then any sample
//! at least one interval after the previously kept one, then the last sample
//! unconditionally so the trace never looks truncated. Because the gate looks
//! only at timestamps, a brief excursion past a limit that falls between two
//! kept samples is dropped from the display entirely. That is a deliberate
//! trade-off inherited from the display pipeline, not a bug to fix here.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::series::{Sample, Series};

/// Standard decimation bucket widths selectable in the interval picker.
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, EnumString, Eq, PartialEq, Serialize, Deserialize,
)]
pub enum DecimationInterval {
    #[default]
    #[strum(serialize = "1min")]
    #[serde(rename = "1min")]
    OneMinute,
    #[strum(serialize = "5min")]
    #[serde(rename = "5min")]
    FiveMinutes,
    #[strum(serialize = "10min")]
    #[serde(rename = "10min")]
    TenMinutes,
    #[strum(serialize = "30min")]
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,
}

impl DecimationInterval {
    /// Bucket width in milliseconds.
    pub fn as_millis(&self) -> i64 {
        match self {
            DecimationInterval::OneMinute => 60 * 1000,
            DecimationInterval::FiveMinutes => 5 * 60 * 1000,
            DecimationInterval::TenMinutes => 10 * 60 * 1000,
            DecimationInterval::ThirtyMinutes => 30 * 60 * 1000,
            DecimationInterval::OneHour => 60 * 60 * 1000,
        }
    }

    /// Parse an interval keyword, falling back to one minute for anything
    /// unrecognized.
    pub fn from_keyword(keyword: &str) -> Self {
        Self::from_str(keyword).unwrap_or_default()
    }

    /// The keyword form used on the wire and in settings files.
    pub fn keyword(&self) -> &'static str {
        match self {
            DecimationInterval::OneMinute => "1min",
            DecimationInterval::FiveMinutes => "5min",
            DecimationInterval::TenMinutes => "10min",
            DecimationInterval::ThirtyMinutes => "30min",
            DecimationInterval::OneHour => "1h",
        }
    }
}

/// Inclusive fetch/display window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Drop samples outside the inclusive date window.
pub fn filter_by_date_interval(samples: &[Sample], window: &DateInterval) -> Vec<Sample> {
    samples
        .iter()
        .filter(|s| window.contains(s.timestamp))
        .cloned()
        .collect()
}

/// Thin a time-ordered sample sequence for display.
///
/// The first sample is always kept. A later sample is kept when its gap to
/// the previously kept sample is at least one interval, or when it is the
/// final sample. `last_kept` tracks the kept sample's own timestamp, not a
/// grid boundary, so buckets drift with the data; that drift is part of the
/// observable behavior and must be preserved.
///
/// Sequences of length 0 or 1 are returned unchanged.
pub fn downsample_by_interval(samples: &[Sample], interval: DecimationInterval) -> Vec<Sample> {
    if samples.len() <= 1 {
        return samples.to_vec();
    }

    let interval_ms = interval.as_millis();
    let mut kept = vec![samples[0].clone()];
    let mut last_kept = samples[0].time_ms();

    for (i, sample) in samples.iter().enumerate().skip(1) {
        let t = sample.time_ms();
        if t - last_kept >= interval_ms || i == samples.len() - 1 {
            kept.push(sample.clone());
            last_kept = t;
        }
    }

    kept
}

/// [`downsample_by_interval`] lifted to a whole series.
pub fn downsample_series(series: &Series, interval: DecimationInterval) -> Series {
    Series::new(
        series.tag.clone(),
        downsample_by_interval(&series.samples, interval),
    )
}
