//! Coordinate mapping from sample rank/time and value to plot pixels.
//!
//! Two x-scale strategies coexist on purpose. Separate (single-series)
//! charts space samples evenly by rank, ignoring the elapsed time between
//! them; the combined chart positions samples proportionally to time. On
//! irregular data the two are not numerically equivalent, and they must not
//! be unified without a product decision — they are different views of the
//! same data, selected per chart mode.

use crate::domain::{TimeDomain, ValueDomain, VALUE_EPSILON};
use crate::series::Series;

/// Horizontal mapping of a sample to a pixel offset inside the plot area.
///
/// `x` takes both the sample's rank within its (sorted) series and its
/// timestamp; each implementation uses the one it cares about. `approx_time_ms`
/// is the inverse used to seed hover lookup: given a pixel offset it answers
/// "roughly what instant is under the pointer".
pub trait XScale {
    /// Pixel x in `[0, plot_width]` for the sample at `rank` with timestamp
    /// `at_ms` (epoch milliseconds).
    fn x(&self, rank: usize, at_ms: i64) -> f64;

    /// Approximate timestamp under pixel `px`. `series` is the chart's own
    /// sorted series; the index-based scale snaps through it, the time-based
    /// scale ignores it. `None` when there is nothing to point at.
    fn approx_time_ms(&self, px: f64, series: &Series) -> Option<i64>;
}

/// Rank-proportional x scale for separate charts: samples are spaced evenly
/// regardless of the actual time gaps between them.
#[derive(Clone, Copy, Debug)]
pub struct IndexScale {
    len: usize,
    plot_width: f64,
}

impl IndexScale {
    /// `len` must be the length of the series this scale maps.
    pub fn new(len: usize, plot_width: f64) -> Self {
        Self { len, plot_width }
    }

    /// Nearest sample rank under pixel `px`, clamped into range.
    pub fn rank_at(&self, px: f64) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if self.len == 1 || self.plot_width <= 0.0 {
            return Some(0);
        }
        let raw = (px / self.plot_width) * (self.len - 1) as f64;
        Some((raw.round().max(0.0) as usize).min(self.len - 1))
    }
}

impl XScale for IndexScale {
    fn x(&self, rank: usize, _at_ms: i64) -> f64 {
        if self.len < 2 {
            // A sole point sits at the left edge.
            return 0.0;
        }
        (rank as f64 / (self.len - 1) as f64) * self.plot_width
    }

    fn approx_time_ms(&self, px: f64, series: &Series) -> Option<i64> {
        let rank = self.rank_at(px)?;
        series.samples.get(rank).map(|s| s.time_ms())
    }
}

/// Time-proportional x scale for the combined chart.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    domain: TimeDomain,
    plot_width: f64,
}

impl TimeScale {
    pub fn new(domain: TimeDomain, plot_width: f64) -> Self {
        Self { domain, plot_width }
    }

    /// Pixel x for an arbitrary instant, used for ticks and cursor lines.
    pub fn x_at_time(&self, at_ms: i64) -> f64 {
        // Span floored at 1 ms so a single-instant domain maps to x=0
        // instead of dividing by zero.
        let span = self.domain.span_ms().max(1) as f64;
        self.plot_width * (at_ms - self.domain.min_ms) as f64 / span
    }
}

impl XScale for TimeScale {
    fn x(&self, _rank: usize, at_ms: i64) -> f64 {
        self.x_at_time(at_ms)
    }

    fn approx_time_ms(&self, px: f64, _series: &Series) -> Option<i64> {
        let frac = px / self.plot_width.max(1.0);
        Some(self.domain.min_ms + (frac * self.domain.span_ms() as f64) as i64)
    }
}

/// Vertical mapping of a value into a plot-area y pixel, SVG style: larger
/// values map to smaller y.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    top: f64,
    height: f64,
    domain: ValueDomain,
    confine: bool,
}

impl ValueScale {
    /// Full-height scale for a shared axis.
    pub fn full(plot_height: f64, domain: ValueDomain) -> Self {
        Self {
            top: 0.0,
            height: plot_height,
            domain,
            confine: false,
        }
    }

    /// Scale confined to one series' band in banded mode. Output never
    /// leaves `[band_top, band_top + band_height]`, even for values (such as
    /// limits) outside the band's own domain.
    pub fn band(band_top: f64, band_height: f64, domain: ValueDomain) -> Self {
        Self {
            top: band_top,
            height: band_height,
            domain,
            confine: true,
        }
    }

    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    /// Pixel y for a value.
    pub fn y(&self, value: f64) -> f64 {
        let span = self.domain.span().max(VALUE_EPSILON);
        let y = self.top + self.height - ((value - self.domain.min) / span) * self.height;
        if self.confine {
            y.clamp(self.top, self.top + self.height)
        } else {
            y
        }
    }
}
