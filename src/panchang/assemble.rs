//! Panchang assembly.

use std::sync::Arc;

use serde_json::Value;
use strum::IntoEnumIterator;

use super::types::{LabelStyle, PanchangRequest, PanchangResult, Quantity};
use crate::config::FALLBACK_UTC_OFFSET;
use crate::error_handling::{FacilityError, HandleError};
use crate::facility::{CalcArg, CalcValue, CalculationFacility, GeoLocation, TimePoint};
use crate::recorder::ResultRecorder;

/// Builds a [`PanchangResult`] per request from the calculation facility and
/// hands it to the recorder.
///
/// Each quantity is computed independently: a failing calculation leaves
/// its own field `null` and records `<prefix>_error` in the diagnostics,
/// without touching the other quantities.
#[derive(Clone)]
pub struct PanchangAssembler {
    facility: Arc<CalculationFacility>,
    recorder: Arc<dyn ResultRecorder>,
}

impl PanchangAssembler {
    pub fn new(facility: Arc<CalculationFacility>, recorder: Arc<dyn ResultRecorder>) -> Self {
        Self { facility, recorder }
    }

    /// Computes the Panchang for `request`.
    ///
    /// # Errors
    ///
    /// Only location or time construction can fail the request, after one
    /// fallback attempt each. Calculation and persistence failures are
    /// recorded in `raw` instead.
    pub async fn assemble(&self, request: PanchangRequest) -> Result<PanchangResult, HandleError> {
        let date = request
            .date
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(today);
        let mut result = PanchangResult::new(date, request.city, request.lat, request.lon);

        if let Some(reason) = self.facility.init_error() {
            result.raw.record(
                "error",
                format!("vedastro not installed on server: {}", reason),
            );
            return Ok(result);
        }

        let location = locate(&result.city, request.lat, request.lon)?;
        let time = time_for(&result.date, &location)?;

        for quantity in Quantity::iter() {
            self.compute(&mut result, quantity, &time).await;
        }

        self.persist(&mut result).await;
        Ok(result)
    }

    async fn compute(&self, result: &mut PanchangResult, quantity: Quantity, time: &TimePoint) {
        let prefix = quantity.diagnostic_prefix();
        match self.first_value(quantity, time).await {
            Ok(value) => {
                let label = value.as_ref().map(|v| match quantity.label_style() {
                    LabelStyle::Named => v.label().to_string(),
                    LabelStyle::Text => v.to_string(),
                });
                result.set(quantity, label);
                let object = value.map_or(Value::Null, |v| Value::String(v.to_string()));
                result.raw.record(format!("{}_obj", prefix), object);
            }
            Err(e) => {
                log::warn!("{} calculation failed: {}", quantity.field(), e);
                result.raw.record(format!("{}_error", prefix), e.to_string());
            }
        }
    }

    /// Runs the quantity's probe chain until a capability yields a value.
    async fn first_value(
        &self,
        quantity: Quantity,
        time: &TimePoint,
    ) -> Result<Option<CalcValue>, FacilityError> {
        for probe in quantity.probes() {
            let args = if probe.with_time {
                vec![CalcArg::Time(time.clone())]
            } else {
                Vec::new()
            };
            if let Some(value) = self.facility.safe_call(probe.name, &args).await? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Hands a snapshot of the result to the recorder on its own task.
    ///
    /// The outcome is merged into `raw` as `sheet_written`, or `sheet_error`
    /// when the task itself dies.
    async fn persist(&self, result: &mut PanchangResult) {
        let recorder = Arc::clone(&self.recorder);
        let snapshot = result.clone();
        match tokio::spawn(async move { recorder.record(&snapshot).await }).await {
            Ok(written) => result.raw.record("sheet_written", written),
            Err(e) => {
                log::error!("Spreadsheet write task failed: {}", e);
                result.raw.record("sheet_error", e.to_string());
            }
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Builds the location, trying `(lon, lat)` and then `(lat, lon)`.
fn locate(city: &str, lat: f64, lon: f64) -> Result<GeoLocation, HandleError> {
    GeoLocation::new(city, lon, lat).or_else(|e| {
        log::debug!("{}; retrying with swapped coordinates", e);
        GeoLocation::new(city, lat, lon)
    })
}

/// Parses the date as given, then as a midnight time string with the
/// fallback offset.
fn time_for(date: &str, location: &GeoLocation) -> Result<TimePoint, HandleError> {
    TimePoint::parse(date, location).or_else(|_| {
        let fallback = format!("00:00 {} {}", date, FALLBACK_UTC_OFFSET);
        TimePoint::parse(&fallback, location)
    })
}
