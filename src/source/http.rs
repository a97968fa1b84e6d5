//! HTTP sample source.
//!
//! Posts the tag, date window and interval keyword to the backend's
//! `/sensor-data` endpoint and deserializes the returned sample list. The
//! backend may pre-decimate using the interval keyword; loading decimates
//! again either way, which is idempotent for an already-thinned series.

use serde::Serialize;

use super::{SampleSource, SourceError};
use crate::downsample::{DateInterval, DecimationInterval};
use crate::series::Sample;

/// User agent for API requests
const USER_AGENT: &str = concat!("rigview/", env!("CARGO_PKG_VERSION"));

/// Request body for the sensor-data endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SensorDataRequest<'a> {
    tag: &'a str,
    date_interval: &'a DateInterval,
    interval: &'a str,
}

/// Sample source backed by the telemetry HTTP API.
#[derive(Clone, Debug)]
pub struct HttpSampleSource {
    base_url: String,
}

impl HttpSampleSource {
    /// `base_url` without a trailing slash, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl SampleSource for HttpSampleSource {
    fn fetch(
        &self,
        tag: &str,
        window: &DateInterval,
        interval: DecimationInterval,
    ) -> Result<Vec<Sample>, SourceError> {
        let url = format!("{}/sensor-data", self.base_url);
        let body = SensorDataRequest {
            tag,
            date_interval: window,
            interval: interval.keyword(),
        };

        let mut response = ureq::post(&url)
            .header("User-Agent", USER_AGENT)
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => SourceError::Status {
                    status,
                    message: format!("HTTP {}", status),
                },
                _ => SourceError::Network(e.to_string()),
            })?;

        response
            .body_mut()
            .read_json()
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}
