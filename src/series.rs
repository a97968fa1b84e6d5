//! Core sensor data types: samples, series, series sets, and limits.
//!
//! Everything downstream of the source adapters works on the types in this
//! module. A [`Series`] is never mutated in place: the normalizer and the
//! downsampler both allocate fresh sample sequences, so a render pass can
//! always be recomputed from the same inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single sensor measurement for one tag.
///
/// `id` and `tags_data_id` are opaque identifiers carried through from the
/// data source; the charting engine never interprets them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    #[serde(default)]
    pub id: String,
    pub tag: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub tags_data_id: Option<String>,
}

impl Sample {
    /// Timestamp in milliseconds since the Unix epoch, the unit all
    /// time arithmetic in the engine uses.
    #[inline]
    pub fn time_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// Optional threshold bounds for a tag. Either bound may be absent,
/// which disables that comparison entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagLimits {
    pub upper_limit: Option<f64>,
    pub lower_limit: Option<f64>,
}

impl TagLimits {
    pub fn new(upper_limit: Option<f64>, lower_limit: Option<f64>) -> Self {
        Self {
            upper_limit,
            lower_limit,
        }
    }

    /// Limits with both bounds set.
    pub fn band(upper: f64, lower: f64) -> Self {
        Self::new(Some(upper), Some(lower))
    }

    /// No limit configured in either direction.
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// A named, time-ordered sequence of samples for one tag.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Series {
    pub tag: String,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(tag: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            tag: tag.into(),
            samples,
        }
    }

    /// An empty series for a tag, the "no data" state.
    pub fn empty(tag: impl Into<String>) -> Self {
        Self::new(tag, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// A new series with samples stably sorted by timestamp. Samples that
    /// share a timestamp keep their insertion order. The input is untouched;
    /// an empty series yields an empty series.
    pub fn normalized(&self) -> Series {
        let mut samples = self.samples.clone();
        samples.sort_by_key(Sample::time_ms);
        Series::new(self.tag.clone(), samples)
    }

    /// Timestamp of the first sample, in epoch milliseconds.
    pub fn first_time_ms(&self) -> Option<i64> {
        self.samples.first().map(Sample::time_ms)
    }

    /// Timestamp of the last sample, in epoch milliseconds.
    pub fn last_time_ms(&self) -> Option<i64> {
        self.samples.last().map(Sample::time_ms)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }
}

/// An ordered collection of series keyed by tag.
///
/// Iteration order is the insertion order of the selected-tags list, which
/// makes rendering and legend ordering deterministic. Lookup is positional;
/// the handful of visible series never justifies a hash map.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SeriesSet {
    series: Vec<Series>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series, replacing any existing series with the same tag
    /// in place (its position in the ordering is kept).
    pub fn insert(&mut self, series: Series) {
        match self.series.iter().position(|s| s.tag == series.tag) {
            Some(idx) => self.series[idx] = series,
            None => self.series.push(series),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The reference series for hover snapping: the first series in
    /// insertion order that has at least one sample.
    pub fn first_non_empty(&self) -> Option<&Series> {
        self.series.iter().find(|s| !s.is_empty())
    }
}

impl<'a> IntoIterator for &'a SeriesSet {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}
