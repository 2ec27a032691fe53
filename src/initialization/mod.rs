//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - Outbound HTTP client
//! - CORS policy
//! - Application state (calculation facility and spreadsheet recorder)
//!
//! Everything built here is immutable once the server starts.

mod client;
mod logger;

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::facility::CalculationFacility;
use crate::recorder::SheetRecorder;
use crate::server::AppState;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Builds the CORS layer for the configured frontend origin.
///
/// `*` allows any origin without credentials. A concrete origin is allowed
/// with credentials, mirroring the requested methods and headers (wildcards
/// are not permitted together with credentials).
///
/// # Errors
///
/// Returns `InitializationError::OriginError` if the origin is not a valid
/// header value.
pub fn init_cors(frontend_origin: &str) -> Result<CorsLayer, InitializationError> {
    let origin = frontend_origin.trim();
    if origin == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let value = HeaderValue::from_str(origin)
        .map_err(|_| InitializationError::OriginError(origin.to_string()))?;
    Ok(CorsLayer::new()
        .allow_origin(value)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Builds the shared application state from configuration.
///
/// The calculation facility never fails this step: an initialization problem
/// is recorded inside the facility and reported per request instead.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the HTTP client cannot be
/// built.
pub fn init_state(config: &Config) -> Result<AppState, InitializationError> {
    let client = init_client(config)?;

    let facility = CalculationFacility::remote(&config.vedastro_api_url, client.clone());
    match facility.init_error() {
        None => log::info!("Calculation facility ready at {}", config.vedastro_api_url),
        Some(reason) => log::warn!("Calculation facility unavailable: {}", reason),
    }

    let recorder = SheetRecorder::from_config(config, client);
    if recorder.is_configured() {
        log::info!("Spreadsheet logging enabled");
    } else {
        log::info!("Spreadsheet logging disabled (GSHEET_ID / GOOGLE_SERVICE_ACCOUNT_JSON not set)");
    }

    Ok(AppState::new(Arc::new(facility), Arc::new(recorder)))
}
