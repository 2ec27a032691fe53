//! Placeholder Panchang handler.
//!
//! Deprecated: returns fixed values so clients could be built before the
//! calculation backend was wired in. `GET /panchang` is the real endpoint.

use axum::Json;

use super::super::types::{StubRequest, StubResponse};

/// Echoes the request with hardcoded Panchang values.
pub async fn stub_handler(Json(request): Json<StubRequest>) -> Json<StubResponse> {
    log::warn!("POST /api/panchang is a deprecated placeholder; use GET /panchang");
    Json(StubResponse {
        status: "ok".to_string(),
        date: request.date,
        lat: request.lat,
        lon: request.lon,
        city: request.city,
        tithi: "Pratipada".to_string(),
        nakshatra: "Rohini".to_string(),
        sunrise: "06:28".to_string(),
        sunset: "17:48".to_string(),
    })
}
