//! Server state and wire types.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::facility::CalculationFacility;
use crate::panchang::PanchangAssembler;
use crate::recorder::ResultRecorder;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    facility: Arc<CalculationFacility>,
    assembler: PanchangAssembler,
}

impl AppState {
    pub fn new(facility: Arc<CalculationFacility>, recorder: Arc<dyn ResultRecorder>) -> Self {
        let assembler = PanchangAssembler::new(Arc::clone(&facility), recorder);
        Self {
            facility,
            assembler,
        }
    }

    pub fn facility(&self) -> &CalculationFacility {
        &self.facility
    }

    pub fn assembler(&self) -> &PanchangAssembler {
        &self.assembler
    }
}

/// JSON response for `GET /`
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub vedastro_available: bool,
}

/// JSON body of `POST /api/panchang`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubRequest {
    pub date: String,
    pub lat: f64,
    pub lon: f64,
    pub city: String,
}

/// Fixed-shape response of `POST /api/panchang`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubResponse {
    pub status: String,
    pub date: String,
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub tithi: String,
    pub nakshatra: String,
    pub sunrise: String,
    pub sunset: String,
}

/// Unexpected failure of a request, rendered as HTTP 500.
///
/// The body carries the error message followed by the full error report
/// (cause chain, and a backtrace when `RUST_BACKTRACE` is enabled).
#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        log::error!("Request failed: {:#}", self.0);
        let detail = format!("Server error: {}\n{:?}", self.0, self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail })).into_response()
    }
}
