//! Rigview - a threshold-aware time-series charting engine for sensor telemetry
//!
//! The demo binary stands in for a rendering surface: it loads a few mock
//! sensor series, runs a combined render pass and writes the resulting frame
//! to stdout as JSON.

use std::collections::HashMap;

use anyhow::Context;
use chrono::{Duration, Utc};

use rigview::downsample::DateInterval;
use rigview::engine::{render_combined, CombinedLayout};
use rigview::series::TagLimits;
use rigview::settings::UserSettings;
use rigview::source::{load_series_set, MockSampleSource, StaticLimitsSource};
use rigview::sync::HoverCursor;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = UserSettings::load();
    tracing::info!(
        interval = settings.default_interval.keyword(),
        "loaded settings"
    );

    let tags: Vec<String> = [
        "DC_out_100ms[148]",
        "DC_out_100ms[149]",
        "MP_TripTank_Volume",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect();

    let now = Utc::now();
    let window = DateInterval::new(now - Duration::hours(4), now);

    let source = MockSampleSource::default();
    let set = load_series_set(&source, &tags, &window, settings.default_interval);

    let limits_source = StaticLimitsSource::with_fallback(settings.default_limits());
    let limits: HashMap<String, TagLimits> = set
        .tags()
        .map(|tag| (tag.to_string(), limits_source.resolved(tag)))
        .collect();

    // Hover the middle of the window so the frame carries a readout
    let mut cursor = HoverCursor::new();
    cursor.update(&set, (now - Duration::hours(2)).timestamp_millis());

    let frame = render_combined(
        &set,
        &limits,
        (1280.0, 720.0),
        CombinedLayout::Shared,
        &cursor,
    );
    tracing::info!(
        series = frame.series.len(),
        no_data = frame.no_data,
        "rendered combined frame"
    );

    let json = serde_json::to_string_pretty(&frame).context("Failed to serialize chart frame")?;
    println!("{json}");

    Ok(())
}
