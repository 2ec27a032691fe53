// Shared test helpers for spinning up the service and building fixtures.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::Arc;

use panchang_service::facility::{CalcValue, CalculationFacility, Catalog};
use panchang_service::initialization::init_cors;
use panchang_service::recorder::{ResultRecorder, SheetRecorder};
use panchang_service::server::{build_router, AppState};
use panchang_service::Config;

/// Private key matching `fixtures/test_service_account_key.pub.pem`.
#[allow(dead_code)] // Used by other test files
pub const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_service_account_key.pem");

/// Serves `state` on an ephemeral local port and returns the base URL.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("Failed to read local address");
    let app = build_router(state, init_cors("*").expect("wildcard CORS is valid"));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", address)
}

/// A catalog answering every primary Panchang calculation.
#[allow(dead_code)] // Used by other test files
pub fn full_catalog() -> Catalog {
    Catalog::new()
        .with_fn("TithiAtTime", |_| Ok(CalcValue::named("Pratipada", "Tithi(Pratipada)")))
        .with_fn("NakshatraAtTime", |_| Ok(CalcValue::named("Rohini", "Nakshatra(Rohini)")))
        .with_fn("YogaAtTime", |_| Ok(CalcValue::named("Siddha", "Yoga(Siddha)")))
        .with_fn("KaranAtTime", |_| Ok(CalcValue::named("Bava", "Karan(Bava)")))
        .with_fn("RahuKaalAtDate", |_| Ok(CalcValue::text("10:30-12:00")))
        .with_fn("GulikaAtDate", |_| Ok(CalcValue::text("07:30-09:00")))
        .with_fn("AbhijitAtDate", |_| Ok(CalcValue::text("12:01-12:49")))
}

/// Spreadsheet recorder with persistence disabled.
#[allow(dead_code)] // Used by other test files
pub fn disabled_recorder() -> Arc<dyn ResultRecorder> {
    Arc::new(SheetRecorder::from_config(
        &Config::default(),
        reqwest::Client::new(),
    ))
}

/// App state over `facility` with persistence disabled.
#[allow(dead_code)] // Used by other test files
pub fn state_with(facility: CalculationFacility) -> AppState {
    AppState::new(Arc::new(facility), disabled_recorder())
}

/// A service-account key document whose token endpoint is `token_uri`.
#[allow(dead_code)] // Used by other test files
pub fn service_account_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "panchang-test",
        "client_email": "panchang@panchang-test.iam.gserviceaccount.com",
        "private_key": TEST_PRIVATE_KEY,
        "token_uri": token_uri,
    })
    .to_string()
}

/// Today's local date as `YYYY-MM-DD`.
#[allow(dead_code)] // Used by other test files
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
