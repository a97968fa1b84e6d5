//! Synchronized cross-series hover lookup.
//!
//! A pointer position inverse-maps to an approximate instant; the first
//! non-empty series (in set order) snaps it to a real sample time, and every
//! visible series then independently contributes its nearest sample within a
//! five-minute tolerance. Series with nothing close enough read out as
//! absent, which renders as an em-dash rather than a zero.
//!
//! All lookups are linear scans, O(n) per series per pointer event. That is
//! the contract; a binary search over the sorted timestamps would be a pure
//! optimization with identical observable behavior. Throttling pointer
//! events is the event producer's concern, not handled here.

use serde::{Deserialize, Serialize};

use crate::series::{Sample, Series, SeriesSet};

/// Maximum |Δt| for a series to contribute a value to the readout.
pub const SYNC_TOLERANCE_MS: i64 = 5 * 60 * 1000;

/// Index of the sample nearest to `target_ms`. Ties resolve to the earliest
/// sample. `None` only for an empty series.
pub fn nearest_rank(series: &Series, target_ms: i64) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (rank, sample) in series.samples.iter().enumerate() {
        let diff = (sample.time_ms() - target_ms).abs();
        if best.map_or(true, |(_, best_diff)| diff < best_diff) {
            best = Some((rank, diff));
        }
    }
    best.map(|(rank, _)| rank)
}

/// The sample nearest to `target_ms`, if any.
pub fn nearest_sample<'a>(series: &'a Series, target_ms: i64) -> Option<&'a Sample> {
    nearest_rank(series, target_ms).map(|rank| &series.samples[rank])
}

/// Snap an approximate pointer instant to a real sample time of the
/// reference series (the first non-empty one, in set order). The result is
/// canonical for the whole hover event.
pub fn snap_to_sample_time(set: &SeriesSet, approx_ms: i64) -> Option<i64> {
    let reference = set.first_non_empty()?;
    nearest_sample(reference, approx_ms).map(Sample::time_ms)
}

/// One series' contribution to the synchronized readout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadoutEntry {
    pub tag: String,
    /// `None` when the series has no sample within tolerance of the snapped
    /// time. Distinct from a real zero.
    pub value: Option<f64>,
}

impl ReadoutEntry {
    /// Tooltip text: one decimal, em-dash for absent.
    pub fn display_value(&self) -> String {
        match self.value {
            Some(v) => format!("{v:.1}"),
            None => "—".to_string(),
        }
    }
}

/// Synchronized tooltip data for one hover event.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverReadout {
    /// Snapped timestamp, epoch milliseconds.
    pub snapped_ms: i64,
    /// One entry per series, in set order.
    pub entries: Vec<ReadoutEntry>,
}

/// Resolve every series' value at the snapped time, within tolerance.
pub fn readout_at(set: &SeriesSet, snapped_ms: i64) -> HoverReadout {
    let entries = set
        .iter()
        .map(|series| {
            let value = nearest_sample(series, snapped_ms)
                .filter(|s| (s.time_ms() - snapped_ms).abs() <= SYNC_TOLERANCE_MS)
                .map(|s| s.value);
            ReadoutEntry {
                tag: series.tag.clone(),
                value,
            }
        })
        .collect();
    HoverReadout {
        snapped_ms,
        entries,
    }
}

/// Snap an approximate instant and build the full readout in one step.
pub fn hover_readout(set: &SeriesSet, approx_ms: i64) -> Option<HoverReadout> {
    snap_to_sample_time(set, approx_ms).map(|snapped| readout_at(set, snapped))
}

/// Owned hover coordinator shared by every chart in a view.
///
/// Replaces the ambient "global vertical line" of earlier iterations: the
/// view owns one cursor and passes it by reference to each chart render, so
/// all charts agree on the snapped instant.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverCursor {
    snapped_ms: Option<i64>,
}

impl HoverCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-snap the cursor from an approximate pointer instant. Clears the
    /// cursor when the set has no samples to snap to.
    pub fn update(&mut self, set: &SeriesSet, approx_ms: i64) {
        self.snapped_ms = snap_to_sample_time(set, approx_ms);
    }

    /// Pointer left the plot area.
    pub fn clear(&mut self) {
        self.snapped_ms = None;
    }

    pub fn snapped_ms(&self) -> Option<i64> {
        self.snapped_ms
    }
}
