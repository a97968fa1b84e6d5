//! Value and time domain calculation.
//!
//! Domains are always padded so a flat or single-sample series still yields a
//! usable axis: the value domain substitutes a 1e-6 epsilon range before
//! padding, and a missing or single-instant time domain falls back to the
//! last minute of wall-clock time.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::series::{Series, SeriesSet};

/// Fraction of the raw value range added as padding on each side.
pub const DOMAIN_PADDING: f64 = 0.1;

/// Effective range floor when all values are equal.
pub const VALUE_EPSILON: f64 = 1e-6;

/// Fallback time window width when no real time domain exists.
pub const FALLBACK_WINDOW_MS: i64 = 60_000;

/// Padded value bounds for a y axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    /// Compute a padded domain from raw values. With no values at all the
    /// raw bounds default to [0, 1] before padding.
    pub fn of_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        }
        let pad = (max - min).max(VALUE_EPSILON) * DOMAIN_PADDING;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    /// Padded domain of a single series, used per band in banded mode.
    pub fn of_series(series: &Series) -> Self {
        Self::of_values(series.values())
    }

    /// Padded domain across every series in the set, used by the shared
    /// axis in combined mode.
    pub fn of_set(set: &SeriesSet) -> Self {
        Self::of_values(set.iter().flat_map(Series::values))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Time bounds of a combined chart, in epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeDomain {
    pub min_ms: i64,
    pub max_ms: i64,
}

impl TimeDomain {
    /// Earliest first-timestamp to latest last-timestamp across the set.
    /// Returns `None` when every series is empty or the whole set collapses
    /// to a single instant.
    pub fn of_set(set: &SeriesSet) -> Option<Self> {
        let mut min_ms = i64::MAX;
        let mut max_ms = i64::MIN;
        for series in set {
            if let (Some(first), Some(last)) = (series.first_time_ms(), series.last_time_ms()) {
                min_ms = min_ms.min(first);
                max_ms = max_ms.max(last);
            }
        }
        if min_ms >= max_ms {
            return None;
        }
        Some(Self { min_ms, max_ms })
    }

    /// The substitute window [now − 1 minute, now].
    pub fn fallback_window(now_ms: i64) -> Self {
        Self {
            min_ms: now_ms - FALLBACK_WINDOW_MS,
            max_ms: now_ms,
        }
    }

    /// Domain of the set, or the fallback window ending at the current
    /// wall-clock time when the set has no usable extent.
    pub fn resolve(set: &SeriesSet) -> Self {
        Self::of_set(set)
            .unwrap_or_else(|| Self::fallback_window(Utc::now().timestamp_millis()))
    }

    pub fn span_ms(&self) -> i64 {
        self.max_ms - self.min_ms
    }
}
