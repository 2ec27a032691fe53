//! REST calculation backend.
//!
//! Calls are mapped onto a VedAstro-style URL layout:
//!
//! ```text
//! {base}/Calculate/{Name}/Location/{city}/Coordinates/{lat},{lon}/Time/{HH:MM}/{DD}/{MM}/{YYYY}/{+HH:MM}
//! ```
//!
//! and answered with `{"Status": "Pass", "Payload": {...}}`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{CalcArg, CalcValue, Capability, Catalog, GeoLocation, TimePoint};
use crate::error_handling::{truncate_body, BackendError, CapabilityError};

/// Calculation names served by the REST backend.
pub const REMOTE_CALCULATIONS: &[&str] = &[
    "TithiAtTime",
    "AllTithiData",
    "NakshatraAtTime",
    "AllNakshatraData",
    "YogaAtTime",
    "AllYogaData",
    "KaranAtTime",
    "AllKaranData",
    "RahuKaalAtDate",
    "GulikaAtDate",
    "AbhijitAtDate",
];

const STATUS_PASS: &str = "Pass";

#[derive(Debug, Deserialize)]
struct CalculationResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Payload", default)]
    payload: Value,
}

/// Connection to the REST calculation backend.
#[derive(Debug)]
pub struct RemoteBackend {
    client: reqwest::Client,
    base: Url,
}

impl RemoteBackend {
    /// Validates `base_url` and binds it to `client`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the URL is empty, does not parse, or is not
    /// http(s).
    pub fn new(base_url: &str, client: reqwest::Client) -> Result<Self, BackendError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(BackendError::EmptyUrl);
        }
        let base = Url::parse(trimmed)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(BackendError::Scheme(base.scheme().to_string()));
        }
        Ok(Self { client, base })
    }

    /// Catalog with one capability per entry of [`REMOTE_CALCULATIONS`].
    pub fn catalog(self) -> Catalog {
        let backend = Arc::new(self);
        REMOTE_CALCULATIONS
            .iter()
            .fold(Catalog::new(), |catalog, name| {
                catalog.with(
                    *name,
                    RemoteCalculation {
                        backend: Arc::clone(&backend),
                        name: name.to_string(),
                    },
                )
            })
    }

    /// Builds the request URL for `name` with `args`.
    fn calculation_url(&self, name: &str, args: &[CalcArg]) -> Result<Url, CapabilityError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CapabilityError::Failed(format!("calculation backend URL {} cannot take a path", self.base))
            })?;
            segments.pop_if_empty().push("Calculate").push(name);
            for arg in args {
                match arg {
                    CalcArg::Time(time) => {
                        push_location(&mut segments, time.location());
                        push_time(&mut segments, time);
                    }
                }
            }
        }
        Ok(url)
    }

    async fn call(&self, name: &str, args: &[CalcArg]) -> Result<CalcValue, CapabilityError> {
        let url = self.calculation_url(name, args)?;
        log::debug!("Calculation request: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CapabilityError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: CalculationResponse = serde_json::from_str(&body).map_err(|e| {
            CapabilityError::Failed(format!("unreadable calculation response: {}", e))
        })?;
        if parsed.status != STATUS_PASS {
            let reason = match parsed.payload {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return Err(CapabilityError::Rejected(truncate_body(&reason)));
        }
        Ok(CalcValue::from_json(parsed.payload))
    }
}

fn push_location(segments: &mut url::PathSegmentsMut<'_>, location: &GeoLocation) {
    segments
        .push("Location")
        .push(location.name())
        .push("Coordinates")
        .push(&format!("{},{}", location.latitude(), location.longitude()));
}

fn push_time(segments: &mut url::PathSegmentsMut<'_>, time: &TimePoint) {
    let instant = time.instant();
    segments
        .push("Time")
        .push(&instant.format("%H:%M").to_string())
        .push(&instant.format("%d").to_string())
        .push(&instant.format("%m").to_string())
        .push(&instant.format("%Y").to_string())
        .push(&instant.format("%:z").to_string());
}

/// One catalog entry backed by the REST API.
struct RemoteCalculation {
    backend: Arc<RemoteBackend>,
    name: String,
}

#[async_trait]
impl Capability for RemoteCalculation {
    async fn invoke(&self, args: &[CalcArg]) -> Result<CalcValue, CapabilityError> {
        self.backend.call(&self.name, args).await
    }
}
