//! Render passes: from a series set to a serializable frame of drawing
//! primitives.
//!
//! A frame is a pure function of (series set, limits, container size, hover
//! cursor); nothing is cached between passes. Series are independent until
//! the hover readout, so combined-mode frame construction fans out across
//! series with rayon and reassembles in set order.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{TimeDomain, ValueDomain};
use crate::layout::{
    compute_bands, index_time_ticks, time_ticks, value_ticks, Band, Margins, PlotArea, Tick,
    BAND_TICK_DIVISIONS, COMBINED_MARGINS, SEPARATE_MARGINS, VALUE_TICK_DIVISIONS,
};
use crate::scale::{IndexScale, TimeScale, ValueScale, XScale};
use crate::segment::{
    limit_guides, sample_markers, scale_series, segment_series, LimitLine, LineSegment, Marker,
    Rgb,
};
use crate::series::{Series, SeriesSet, TagLimits};
use crate::sync::{nearest_rank, readout_at, HoverCursor, HoverReadout};

/// Line color palette, assigned to series by selection index. Red and orange
/// are reserved for out-of-limits strokes and limit guides.
pub const CHART_COLORS: &[Rgb] = &[
    [33, 150, 243],  // Blue
    [76, 175, 80],   // Green
    [156, 39, 176],  // Purple
    [0, 188, 212],   // Cyan
    [233, 30, 99],   // Pink
    [0, 150, 136],   // Teal
    [63, 81, 181],   // Indigo
    [205, 220, 57],  // Lime
    [121, 85, 72],   // Brown
    [158, 158, 158], // Gray
];

/// Palette color for a series' selection index.
pub fn color_for_index(index: usize) -> Rgb {
    CHART_COLORS[index % CHART_COLORS.len()]
}

/// Vertical axis arrangement of the combined chart.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CombinedLayout {
    /// One value domain and one full-height axis shared by every series.
    Shared,
    /// Each series gets its own vertical band and local value domain.
    Banded,
}

/// Tag label anchored at a series' last sample in the combined view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndLabel {
    pub at: [f64; 2],
    pub text: String,
    pub color: Rgb,
}

/// All primitives for one series within a frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesFrame {
    pub tag: String,
    pub color: Rgb,
    pub segments: Vec<LineSegment>,
    pub markers: Vec<Marker>,
    pub limit_guides: Vec<LimitLine>,
    pub end_label: Option<EndLabel>,
}

/// A series' band and its mini value axis in banded mode. The mini axis is
/// drawn adjacent to the shared axis at the plot's left edge, not at the
/// band's own edge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BandFrame {
    pub tag: String,
    pub band: Band,
    pub ticks: Vec<Tick>,
}

/// Synchronized hover cursor line.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorLine {
    pub x: f64,
    pub snapped_ms: i64,
}

/// One complete render pass, ready for a drawing surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrame {
    pub margins: Margins,
    pub plot: PlotArea,
    /// True when there was nothing to draw; the surface shows its
    /// "no data" state instead of an empty plot.
    pub no_data: bool,
    pub x_ticks: Vec<Tick>,
    /// Shared-axis ticks; empty in banded mode.
    pub y_ticks: Vec<Tick>,
    /// Per-series bands; empty outside banded mode.
    pub bands: Vec<BandFrame>,
    pub series: Vec<SeriesFrame>,
    pub cursor: Option<CursorLine>,
    pub readout: Option<HoverReadout>,
}

impl ChartFrame {
    fn no_data(margins: Margins, plot: PlotArea) -> Self {
        Self {
            margins,
            plot,
            no_data: true,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            bands: Vec::new(),
            series: Vec::new(),
            cursor: None,
            readout: None,
        }
    }
}

fn build_series_frame(
    sorted: &Series,
    limits: &TagLimits,
    color: Rgb,
    x_scale: &dyn XScale,
    y_scale: &ValueScale,
    plot: PlotArea,
    with_end_label: bool,
) -> SeriesFrame {
    let scaled = scale_series(sorted, x_scale, y_scale);
    let segments = segment_series(&scaled, limits, y_scale, color);
    let markers = sample_markers(&scaled, limits, color);
    let guides = limit_guides(limits, y_scale);

    let end_label = if with_end_label {
        scaled.last().map(|last| EndLabel {
            at: [(plot.width + 10.0).min(last.x + 8.0), last.y],
            text: sorted.tag.clone(),
            color,
        })
    } else {
        None
    };

    SeriesFrame {
        tag: sorted.tag.clone(),
        color,
        segments,
        markers,
        limit_guides: guides,
        end_label,
    }
}

/// Render one tag as a separate chart with an index-based x scale.
///
/// The whole `set` is passed so the hover readout can report every visible
/// series at the snapped instant, exactly like the combined view.
pub fn render_separate(
    set: &SeriesSet,
    tag: &str,
    limits: &TagLimits,
    color_index: usize,
    container: (f64, f64),
    cursor: &HoverCursor,
) -> ChartFrame {
    let margins = SEPARATE_MARGINS;
    let plot = PlotArea::from_container(container.0, container.1, &margins);

    let sorted = match set.get(tag) {
        Some(series) => series.normalized(),
        None => Series::empty(tag),
    };
    if sorted.is_empty() {
        return ChartFrame::no_data(margins, plot);
    }

    let domain = ValueDomain::of_series(&sorted);
    let x_scale = IndexScale::new(sorted.len(), plot.width);
    let y_scale = ValueScale::full(plot.height, domain);

    let color = color_for_index(color_index);
    let frame = build_series_frame(&sorted, limits, color, &x_scale, &y_scale, plot, false);

    let cursor_line = cursor.snapped_ms().and_then(|snapped| {
        nearest_rank(&sorted, snapped).map(|rank| CursorLine {
            x: x_scale.x(rank, sorted.samples[rank].time_ms()),
            snapped_ms: snapped,
        })
    });
    let readout = cursor.snapped_ms().map(|snapped| readout_at(set, snapped));

    ChartFrame {
        margins,
        plot,
        no_data: false,
        x_ticks: index_time_ticks(&sorted, &x_scale),
        y_ticks: value_ticks(&y_scale, VALUE_TICK_DIVISIONS),
        bands: Vec::new(),
        series: vec![frame],
        cursor: cursor_line,
        readout,
    }
}

/// Render every series of the set into one combined chart with a time-based
/// x scale, either on a shared axis or in per-series bands.
pub fn render_combined(
    set: &SeriesSet,
    limits: &HashMap<String, TagLimits>,
    container: (f64, f64),
    layout: CombinedLayout,
    cursor: &HoverCursor,
) -> ChartFrame {
    let margins = COMBINED_MARGINS;
    let plot = PlotArea::from_container(container.0, container.1, &margins);

    let mut sorted_set = SeriesSet::new();
    for series in set {
        sorted_set.insert(series.normalized());
    }
    if sorted_set.first_non_empty().is_none() {
        return ChartFrame::no_data(margins, plot);
    }

    let time_domain = TimeDomain::resolve(&sorted_set);
    let x_scale = TimeScale::new(time_domain, plot.width);

    let entries: Vec<(usize, &Series)> = sorted_set.iter().enumerate().collect();

    let limits_of = |tag: &str| limits.get(tag).copied().unwrap_or_default();

    let (series_frames, y_ticks, band_frames) = match layout {
        CombinedLayout::Shared => {
            let domain = ValueDomain::of_set(&sorted_set);
            let y_scale = ValueScale::full(plot.height, domain);
            let frames: Vec<SeriesFrame> = entries
                .par_iter()
                .map(|&(index, series)| {
                    build_series_frame(
                        series,
                        &limits_of(&series.tag),
                        color_for_index(index),
                        &x_scale,
                        &y_scale,
                        plot,
                        true,
                    )
                })
                .collect();
            (frames, value_ticks(&y_scale, VALUE_TICK_DIVISIONS), Vec::new())
        }
        CombinedLayout::Banded => {
            let bands = compute_bands(plot.height, entries.len());
            let built: Vec<(SeriesFrame, BandFrame)> = entries
                .par_iter()
                .map(|&(index, series)| {
                    let band = bands[index];
                    let y_scale =
                        ValueScale::band(band.top, band.height, ValueDomain::of_series(series));
                    let frame = build_series_frame(
                        series,
                        &limits_of(&series.tag),
                        color_for_index(index),
                        &x_scale,
                        &y_scale,
                        plot,
                        true,
                    );
                    let band_frame = BandFrame {
                        tag: series.tag.clone(),
                        band,
                        ticks: value_ticks(&y_scale, BAND_TICK_DIVISIONS),
                    };
                    (frame, band_frame)
                })
                .collect();
            let (frames, band_frames): (Vec<SeriesFrame>, Vec<BandFrame>) =
                built.into_iter().unzip();
            (frames, Vec::new(), band_frames)
        }
    };

    let cursor_line = cursor.snapped_ms().map(|snapped| CursorLine {
        x: x_scale.x_at_time(snapped),
        snapped_ms: snapped,
    });
    let readout = cursor
        .snapped_ms()
        .map(|snapped| readout_at(&sorted_set, snapped));

    ChartFrame {
        margins,
        plot,
        no_data: false,
        x_ticks: time_ticks(time_domain, &x_scale),
        y_ticks,
        bands: band_frames,
        series: series_frames,
        cursor: cursor_line,
        readout,
    }
}
