//! Deterministic mock sample source for demos and offline development.
//!
//! Each tag gets a reproducible waveform: a slow hour-scale swing plus a
//! faster ripple, phase-shifted per tag so different tags do not overlap.
//! The values straddle the conventional 18/42 default limits, so threshold
//! segmentation has something to show out of the box.

use std::collections::hash_map::DefaultHasher;
use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};

use chrono::DateTime;
use uuid::Uuid;

use super::{SampleSource, SourceError};
use crate::downsample::{DateInterval, DecimationInterval};
use crate::series::Sample;

/// Cap on generated samples per fetch, regardless of window width.
const MAX_MOCK_SAMPLES: usize = 10_000;

/// Synthetic waveform generator keyed by tag.
#[derive(Clone, Debug)]
pub struct MockSampleSource {
    cadence_ms: i64,
}

impl Default for MockSampleSource {
    fn default() -> Self {
        Self { cadence_ms: 30_000 }
    }
}

impl MockSampleSource {
    /// Source emitting one sample every `cadence_ms` milliseconds.
    pub fn with_cadence_ms(cadence_ms: i64) -> Self {
        Self {
            cadence_ms: cadence_ms.max(1),
        }
    }

    fn phase_of(tag: &str) -> f64 {
        let mut hasher = DefaultHasher::new();
        tag.hash(&mut hasher);
        (hasher.finish() % 1000) as f64 / 1000.0 * TAU
    }

    fn value_at(tag: &str, at_ms: i64) -> f64 {
        let phase = Self::phase_of(tag);
        let t = at_ms as f64 / 1000.0;
        let slow = (TAU * t / 3600.0 + phase).sin();
        let ripple = (TAU * t / 300.0 + phase * 1.7).sin();
        30.0 + 14.0 * slow + 3.0 * ripple
    }
}

impl SampleSource for MockSampleSource {
    fn fetch(
        &self,
        tag: &str,
        window: &DateInterval,
        _interval: DecimationInterval,
    ) -> Result<Vec<Sample>, SourceError> {
        let start_ms = window.start.timestamp_millis();
        let end_ms = window.end.timestamp_millis();

        let mut samples = Vec::new();
        let mut at_ms = start_ms;
        while at_ms <= end_ms && samples.len() < MAX_MOCK_SAMPLES {
            if let Some(timestamp) = DateTime::from_timestamp_millis(at_ms) {
                samples.push(Sample {
                    id: Uuid::new_v4().to_string(),
                    tag: tag.to_string(),
                    timestamp,
                    value: Self::value_at(tag, at_ms),
                    tags_data_id: None,
                });
            }
            at_ms += self.cadence_ms;
        }
        Ok(samples)
    }
}
