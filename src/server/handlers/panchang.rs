//! Panchang handler.

use axum::extract::{Query, State};
use axum::Json;

use super::super::types::{AppState, ServerError};
use crate::panchang::{PanchangRequest, PanchangResult};

/// `GET /panchang?date=2025-12-02&lat=26.9124&lon=75.7873&city=Jaipur`
///
/// Always 200 with a [`PanchangResult`] unless the location or time cannot be
/// constructed, which is reported as 500.
pub async fn panchang_handler(
    State(state): State<AppState>,
    Query(request): Query<PanchangRequest>,
) -> Result<Json<PanchangResult>, ServerError> {
    log::info!(
        "Panchang request: date={:?} city={} lat={} lon={} tz={}",
        request.date,
        request.city,
        request.lat,
        request.lon,
        request.tz
    );
    let result = state.assembler().assemble(request).await?;
    Ok(Json(result))
}
