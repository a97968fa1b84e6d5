//! Threshold segmentation: splitting a scaled polyline into classified
//! sub-segments at exact limit-crossing points.
//!
//! Crossing detection is a strict sign-change test. A value exactly equal to
//! a limit is NOT a crossing, and a sample sitting exactly on a limit
//! classifies as in-limits; both follow from the strict `>` / `<`
//! comparisons and stay that way until a product decision says otherwise.

use serde::{Deserialize, Serialize};

use crate::scale::{ValueScale, XScale};
use crate::series::{Series, TagLimits};

/// RGB triple used by all output primitives.
pub type Rgb = [u8; 3];

/// Stroke color for out-of-limits sub-segments and markers, overriding the
/// series base color.
pub const OUT_OF_LIMITS_COLOR: Rgb = [244, 67, 54];

/// Color of the dashed limit guide lines.
pub const LIMIT_GUIDE_COLOR: Rgb = [255, 152, 0];

/// Classification of a sub-segment or marker relative to the tag's limits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SegmentClass {
    InLimits,
    OutOfLimits,
}

impl SegmentClass {
    /// Classify a single value against the limits. Absent bounds never
    /// trigger; the comparisons are strict.
    pub fn classify(value: f64, limits: &TagLimits) -> Self {
        if is_out_of_limits(value, limits) {
            SegmentClass::OutOfLimits
        } else {
            SegmentClass::InLimits
        }
    }

    /// Stroke color for this classification over a series base color.
    pub fn stroke(&self, base: Rgb) -> Rgb {
        match self {
            SegmentClass::InLimits => base,
            SegmentClass::OutOfLimits => OUT_OF_LIMITS_COLOR,
        }
    }
}

/// True when `value` lies strictly beyond either configured bound.
pub fn is_out_of_limits(value: f64, limits: &TagLimits) -> bool {
    limits.upper_limit.is_some_and(|upper| value > upper)
        || limits.lower_limit.is_some_and(|lower| value < lower)
}

/// A sample (or crossing point) mapped to plot coordinates. Ephemeral:
/// recomputed on every render pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaledPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Straight line sub-segment primitive handed to the drawing surface.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub class: SegmentClass,
    pub color: Rgb,
}

/// Sample marker primitive, classified by the sample's own value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Marker {
    pub at: [f64; 2],
    pub class: SegmentClass,
    pub color: Rgb,
}

/// Which bound a limit guide line represents.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum LimitKind {
    Upper,
    Lower,
}

/// Dashed horizontal guide line at a limit value, spanning the plot width.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LimitLine {
    pub y: f64,
    pub value: f64,
    pub kind: LimitKind,
    pub color: Rgb,
}

/// Map a sorted series into plot coordinates.
pub fn scale_series(series: &Series, x_scale: &dyn XScale, y_scale: &ValueScale) -> Vec<ScaledPoint> {
    series
        .samples
        .iter()
        .enumerate()
        .map(|(rank, sample)| ScaledPoint {
            x: x_scale.x(rank, sample.time_ms()),
            y: y_scale.y(sample.value),
            value: sample.value,
        })
        .collect()
}

/// Exact crossing of the segment `p1 → p2` with a limit, or `None` when the
/// endpoint values do not lie strictly on opposite sides of it.
fn crossing(p1: ScaledPoint, p2: ScaledPoint, limit: f64, y_scale: &ValueScale) -> Option<ScaledPoint> {
    let crosses = (p1.value - limit) * (p2.value - limit) < 0.0;
    if !crosses {
        return None;
    }
    let ratio = (limit - p1.value) / (p2.value - p1.value);
    Some(ScaledPoint {
        x: p1.x + (p2.x - p1.x) * ratio,
        y: y_scale.y(limit),
        value: limit,
    })
}

/// Split a scaled polyline into classified sub-segments.
///
/// For each adjacent pair the crossings with the defined limits (zero, one,
/// or two) are inserted between the endpoints in ascending-x order, and each
/// resulting sub-segment is classified by the average of its endpoint values.
/// With both limits crossed inside one gap this yields exactly three
/// sub-segments. Fewer than two points yield no segments at all.
pub fn segment_series(
    points: &[ScaledPoint],
    limits: &TagLimits,
    y_scale: &ValueScale,
    base_color: Rgb,
) -> Vec<LineSegment> {
    let mut segments = Vec::new();
    if points.len() < 2 {
        return segments;
    }

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);

        let mut crossings: Vec<ScaledPoint> = Vec::with_capacity(2);
        if let Some(upper) = limits.upper_limit {
            if let Some(point) = crossing(p1, p2, upper, y_scale) {
                crossings.push(point);
            }
        }
        if let Some(lower) = limits.lower_limit {
            if let Some(point) = crossing(p1, p2, lower, y_scale) {
                crossings.push(point);
            }
        }
        crossings.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut chain = Vec::with_capacity(2 + crossings.len());
        chain.push(p1);
        chain.extend(crossings);
        chain.push(p2);

        for sub in chain.windows(2) {
            let mid_value = (sub[0].value + sub[1].value) / 2.0;
            let class = SegmentClass::classify(mid_value, limits);
            segments.push(LineSegment {
                from: [sub[0].x, sub[0].y],
                to: [sub[1].x, sub[1].y],
                class,
                color: class.stroke(base_color),
            });
        }
    }

    segments
}

/// Marker primitives for every scaled sample, each classified by its own
/// value rather than a midpoint.
pub fn sample_markers(points: &[ScaledPoint], limits: &TagLimits, base_color: Rgb) -> Vec<Marker> {
    points
        .iter()
        .map(|p| {
            let class = SegmentClass::classify(p.value, limits);
            Marker {
                at: [p.x, p.y],
                class,
                color: class.stroke(base_color),
            }
        })
        .collect()
}

/// Guide lines for whichever bounds are configured.
pub fn limit_guides(limits: &TagLimits, y_scale: &ValueScale) -> Vec<LimitLine> {
    let mut guides = Vec::with_capacity(2);
    if let Some(upper) = limits.upper_limit {
        guides.push(LimitLine {
            y: y_scale.y(upper),
            value: upper,
            kind: LimitKind::Upper,
            color: LIMIT_GUIDE_COLOR,
        });
    }
    if let Some(lower) = limits.lower_limit {
        guides.push(LimitLine {
            y: y_scale.y(lower),
            value: lower,
            kind: LimitKind::Lower,
            color: LIMIT_GUIDE_COLOR,
        });
    }
    guides
}
