//! Plot-area geometry and axis tick generation.
//!
//! The layout engine is a pure function of the observed container size;
//! reacting to resize events is the host's job, the engine just gets called
//! again with the new size.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TimeDomain;
use crate::scale::{IndexScale, TimeScale, ValueScale, XScale};
use crate::series::Series;

/// Fixed insets reserving space for axis labels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Margins for a separate (single-series) chart.
pub const SEPARATE_MARGINS: Margins = Margins {
    top: 20.0,
    right: 80.0,
    bottom: 60.0,
    left: 60.0,
};

/// Margins for the combined chart; the wider right inset holds the
/// per-series end labels.
pub const COMBINED_MARGINS: Margins = Margins {
    top: 20.0,
    right: 160.0,
    bottom: 60.0,
    left: 60.0,
};

/// Cap on time-axis ticks in either mode.
pub const MAX_TIME_TICKS: usize = 10;

/// Divisions of a full-height value axis.
pub const VALUE_TICK_DIVISIONS: usize = 8;

/// Divisions of a per-band mini value axis.
pub const BAND_TICK_DIVISIONS: usize = 4;

/// Vertical padding inside each band slot, keeping stacked bands apart.
pub const BAND_PADDING: f64 = 8.0;

/// Plot-area size derived from the container, floored at zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_container(container_width: f64, container_height: f64, margins: &Margins) -> Self {
        Self {
            width: (container_width - margins.left - margins.right).max(0.0),
            height: (container_height - margins.top - margins.bottom).max(0.0),
        }
    }
}

/// An axis tick: pixel offset along its axis plus a human-readable label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub pos: f64,
    pub label: String,
}

/// Short time label for tick text.
pub fn format_time_hhmm(at_ms: i64) -> String {
    Utc.timestamp_millis_opt(at_ms)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Time ticks for a separate chart: evenly spaced by rank, capped at
/// [`MAX_TIME_TICKS`], each labelled with its sample's HH:MM.
pub fn index_time_ticks(series: &Series, x_scale: &IndexScale) -> Vec<Tick> {
    let n = series.len();
    if n == 0 {
        return Vec::new();
    }
    let count = MAX_TIME_TICKS.min(n);
    (0..count)
        .map(|i| {
            let rank = if count > 1 {
                ((i as f64 / (count - 1) as f64) * (n - 1) as f64).floor() as usize
            } else {
                0
            };
            let sample = &series.samples[rank];
            Tick {
                pos: x_scale.x(rank, sample.time_ms()),
                label: format_time_hhmm(sample.time_ms()),
            }
        })
        .collect()
}

/// Time ticks for the combined chart: [`MAX_TIME_TICKS`] instants spread by
/// time fraction across the domain.
pub fn time_ticks(domain: TimeDomain, x_scale: &TimeScale) -> Vec<Tick> {
    let count = MAX_TIME_TICKS;
    (0..count)
        .map(|i| {
            let at_ms = domain.min_ms
                + domain.span_ms() * i as i64 / (count as i64 - 1).max(1);
            Tick {
                pos: x_scale.x_at_time(at_ms),
                label: format_time_hhmm(at_ms),
            }
        })
        .collect()
}

/// Value ticks linearly interpolated across the scale's domain, inclusive of
/// both ends, labels rounded to one decimal. `divisions` is the number of
/// intervals, so the tick count is `divisions + 1`.
pub fn value_ticks(y_scale: &ValueScale, divisions: usize) -> Vec<Tick> {
    let domain = y_scale.domain();
    (0..=divisions)
        .map(|i| {
            let value = domain.min + domain.span() * i as f64 / divisions.max(1) as f64;
            Tick {
                pos: y_scale.y(value),
                label: format!("{value:.1}"),
            }
        })
        .collect()
}

/// One series' vertical slot in banded mode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub top: f64,
    pub height: f64,
}

/// Divide the plot height evenly into padded, non-overlapping bands.
pub fn compute_bands(plot_height: f64, count: usize) -> Vec<Band> {
    if count == 0 {
        return Vec::new();
    }
    let slot = plot_height / count as f64;
    (0..count)
        .map(|i| Band {
            top: i as f64 * slot + BAND_PADDING,
            height: (slot - 2.0 * BAND_PADDING).max(0.0),
        })
        .collect()
}
