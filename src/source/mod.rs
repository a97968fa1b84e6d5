//! Sample and limits source boundary.
//!
//! The engine never fetches anything itself; it consumes series handed to it
//! by a [`SampleSource`]. Sources may return samples in any order — loading
//! normalizes and decimates before the set reaches the engine. A failing tag
//! is isolated to an empty series so the other tags still render.

pub mod http;
pub mod mock;

use std::collections::HashMap;

use thiserror::Error;

use crate::downsample::{
    downsample_series, filter_by_date_interval, DateInterval, DecimationInterval,
};
use crate::series::{Sample, Series, SeriesSet, TagLimits};

pub use http::HttpSampleSource;
pub use mock::MockSampleSource;

/// Errors a sample source can produce.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network error during request
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint returned an error response
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to parse the response payload
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Provider of raw samples for one tag over a date window. Returned samples
/// may be unordered; timestamp parsing problems belong here, never in the
/// engine.
pub trait SampleSource {
    fn fetch(
        &self,
        tag: &str,
        window: &DateInterval,
        interval: DecimationInterval,
    ) -> Result<Vec<Sample>, SourceError>;
}

/// Resolver of per-tag threshold limits. A tag without an entry simply has
/// no limits; that is not an error.
pub trait LimitsSource {
    fn limits_for(&self, tag: &str) -> Option<TagLimits>;
}

/// In-memory limits table with an optional fallback for unknown tags.
#[derive(Clone, Debug, Default)]
pub struct StaticLimitsSource {
    entries: HashMap<String, TagLimits>,
    fallback: Option<TagLimits>,
}

impl StaticLimitsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every tag without its own entry resolves to `fallback`.
    pub fn with_fallback(fallback: TagLimits) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn set(&mut self, tag: impl Into<String>, limits: TagLimits) {
        self.entries.insert(tag.into(), limits);
    }

    /// Limits for a tag, defaulting to unbounded when nothing is configured.
    pub fn resolved(&self, tag: &str) -> TagLimits {
        self.limits_for(tag).unwrap_or_default()
    }
}

impl LimitsSource for StaticLimitsSource {
    fn limits_for(&self, tag: &str) -> Option<TagLimits> {
        self.entries.get(tag).copied().or(self.fallback)
    }
}

/// Fetch, window-filter, normalize and decimate every requested tag into an
/// ordered series set.
///
/// Tag order in the result is the order of `tags`. A fetch failure is logged
/// and yields an empty series for that tag only; the remaining tags are
/// still loaded.
pub fn load_series_set(
    source: &dyn SampleSource,
    tags: &[String],
    window: &DateInterval,
    interval: DecimationInterval,
) -> SeriesSet {
    let mut set = SeriesSet::new();
    for tag in tags {
        let samples = match source.fetch(tag, window, interval) {
            Ok(samples) => samples,
            Err(e) => {
                tracing::warn!("Failed to fetch samples for tag {}: {}", tag, e);
                Vec::new()
            }
        };
        let windowed = filter_by_date_interval(&samples, window);
        let sorted = Series::new(tag.clone(), windowed).normalized();
        set.insert(downsample_series(&sorted, interval));
    }
    set
}
