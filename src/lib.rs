//! Rigview - a threshold-aware time-series charting engine for sensor telemetry
//!
//! This library turns raw sensor samples into abstract drawing primitives:
//! classified line segments, markers, limit guides, axis ticks and a
//! synchronized hover readout. It never touches a drawing API; a rendering
//! surface consumes the primitives and decides how to put them on screen.
//!
//! ## Module Structure
//!
//! - [`series`] - Sample/series/limits data model and the time-order normalizer
//! - [`downsample`] - Decimation intervals, date windowing and time-gated thinning
//! - [`domain`] - Padded value domains and the combined time domain
//! - [`scale`] - Index- and time-based x scales, shared and banded value scales
//! - [`segment`] - Threshold crossing geometry and segment classification
//! - [`sync`] - Cross-series hover snapping and the synchronized readout
//! - [`layout`] - Plot-area geometry, axis ticks and band placement
//! - [`engine`] - Render passes assembling a full [`engine::ChartFrame`]
//! - [`source`] - Sample and limits source boundary (HTTP and mock adapters)
//! - [`settings`] - User settings persistence

pub mod domain;
pub mod downsample;
pub mod engine;
pub mod layout;
pub mod scale;
pub mod segment;
pub mod series;
pub mod settings;
pub mod source;
pub mod sync;
