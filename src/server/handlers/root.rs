//! Service status handler.

use axum::extract::State;
use axum::Json;

use super::super::types::{AppState, RootResponse};

/// Reports liveness and whether the calculation facility initialized.
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok".to_string(),
        vedastro_available: state.facility().is_available(),
    })
}
