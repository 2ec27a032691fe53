//! Panchang assembly against a mocked REST calculation backend.

mod helpers;

use std::sync::Arc;

use helpers::disabled_recorder;
use panchang_service::facility::CalculationFacility;
use panchang_service::panchang::{PanchangAssembler, PanchangRequest};
use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JAIPUR_MIDNIGHT: &str =
    r"/Location/Jaipur/Coordinates/26\.9124,75\.7873/Time/00:00/02/12/2025/";

fn calculation_path(name: &str) -> String {
    format!("^/api/Calculate/{}{}", name, JAIPUR_MIDNIGHT)
}

async fn mount_pass(server: &MockServer, name: &str, payload: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path_regex(calculation_path(name)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Status": "Pass", "Payload": payload})),
        )
        .mount(server)
        .await;
}

fn assembler_for(server: &MockServer) -> PanchangAssembler {
    let facility =
        CalculationFacility::remote(&format!("{}/api", server.uri()), reqwest::Client::new());
    assert!(facility.is_available());
    PanchangAssembler::new(Arc::new(facility), disabled_recorder())
}

fn request() -> PanchangRequest {
    PanchangRequest {
        date: Some("2025-12-02".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_remote_backend_fills_every_quantity() {
    let server = MockServer::start().await;
    mount_pass(
        &server,
        "TithiAtTime",
        json!({"TithiAtTime": {"Name": "Shukla Dwadashi", "Paksha": "Shukla"}}),
    )
    .await;
    mount_pass(&server, "NakshatraAtTime", json!({"NakshatraAtTime": {"Name": "Ashwini"}})).await;
    mount_pass(&server, "YogaAtTime", json!({"YogaAtTime": {"Name": "Vyatipata"}})).await;
    mount_pass(&server, "KaranAtTime", json!({"KaranAtTime": {"Name": "Balava"}})).await;
    mount_pass(&server, "RahuKaalAtDate", json!({"RahuKaalAtDate": "15:00 - 16:30"})).await;
    mount_pass(&server, "GulikaAtDate", json!({"GulikaAtDate": "12:10 - 13:35"})).await;
    mount_pass(&server, "AbhijitAtDate", json!({"AbhijitAtDate": "11:48 - 12:31"})).await;

    let result = assembler_for(&server)
        .assemble(request())
        .await
        .expect("assembly succeeds");

    assert_eq!(result.tithi.as_deref(), Some("Shukla Dwadashi"));
    assert_eq!(result.nakshatra.as_deref(), Some("Ashwini"));
    assert_eq!(result.yoga.as_deref(), Some("Vyatipata"));
    assert_eq!(result.karan.as_deref(), Some("Balava"));
    assert_eq!(result.rahu_kaal.as_deref(), Some("15:00 - 16:30"));
    assert_eq!(result.gulika_kaal.as_deref(), Some("12:10 - 13:35"));
    assert_eq!(result.abhijit.as_deref(), Some("11:48 - 12:31"));
    assert!(result.raw.contains("tithi_obj"));
    assert!(!result.raw.contains("tithi_error"));
}

#[tokio::test]
async fn test_remote_failures_stay_per_quantity() {
    let server = MockServer::start().await;
    mount_pass(&server, "TithiAtTime", json!({"TithiAtTime": {"Name": "Pratipada"}})).await;
    Mock::given(method("GET"))
        .and(path_regex(calculation_path("NakshatraAtTime")))
        .respond_with(ResponseTemplate::new(500).set_body_string("ephemeris offline"))
        .mount(&server)
        .await;
    // A failing capability ends the chain: the secondary name is not tried
    Mock::given(method("GET"))
        .and(path_regex("^/api/Calculate/AllNakshatraData/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(calculation_path("YogaAtTime")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Status": "Fail", "Payload": "Location not supported"})),
        )
        .mount(&server)
        .await;

    let result = assembler_for(&server)
        .assemble(request())
        .await
        .expect("assembly succeeds");

    assert_eq!(result.tithi.as_deref(), Some("Pratipada"));

    assert_eq!(result.nakshatra, None);
    let nakshatra_error = result.raw.get("nakshatra_error").expect("error recorded");
    let nakshatra_error = nakshatra_error.as_str().expect("error is text");
    assert!(nakshatra_error.starts_with("NakshatraAtTime failed"));
    assert!(nakshatra_error.contains("HTTP 500"));
    assert!(nakshatra_error.contains("ephemeris offline"));

    assert_eq!(result.yoga, None);
    let yoga_error = result.raw.get("yoga_error").expect("error recorded");
    assert!(yoga_error
        .as_str()
        .expect("error is text")
        .contains("Location not supported"));

    // Unmocked calculations answer 404 and are recorded the same way
    assert_eq!(result.karan, None);
    assert!(result.raw.contains("karan_error"));
}

#[tokio::test]
async fn test_empty_pass_payload_falls_through_to_secondary_name() {
    let server = MockServer::start().await;
    mount_pass(&server, "TithiAtTime", json!(null)).await;
    mount_pass(&server, "AllTithiData", json!({"Name": "Dwitiya"})).await;
    mount_pass(&server, "NakshatraAtTime", json!({"NakshatraAtTime": ""})).await;
    mount_pass(&server, "AllNakshatraData", json!({"AllNakshatraData": null})).await;
    // Pass without any payload field
    Mock::given(method("GET"))
        .and(path_regex(calculation_path("YogaAtTime")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": "Pass"})))
        .mount(&server)
        .await;
    mount_pass(&server, "AllYogaData", json!({"AllYogaData": {"Name": "Shubha"}})).await;

    let result = assembler_for(&server)
        .assemble(request())
        .await
        .expect("assembly succeeds");

    assert_eq!(result.tithi.as_deref(), Some("Dwitiya"));
    assert_eq!(result.yoga.as_deref(), Some("Shubha"));
    assert_eq!(result.nakshatra, None);
    assert_eq!(result.raw.get("nakshatra_obj"), Some(&serde_json::Value::Null));
    assert!(!result.raw.contains("nakshatra_error"));
    assert!(!result.raw.contains("tithi_error"));
}

#[tokio::test]
async fn test_unreachable_backend_does_not_fail_request() {
    // Nothing listens on the discard port
    let facility = CalculationFacility::remote("http://127.0.0.1:9/api", reqwest::Client::new());
    let assembler = PanchangAssembler::new(Arc::new(facility), disabled_recorder());

    let result = assembler.assemble(request()).await.expect("assembly succeeds");

    assert_eq!(result.tithi, None);
    assert_eq!(result.abhijit, None);
    assert!(result.raw.contains("tithi_error"));
    assert!(result.raw.contains("abhijit_error"));
    assert_eq!(result.raw.get("sheet_written"), Some(&json!(false)));
}

#[tokio::test]
async fn test_invalid_backend_url_makes_facility_unavailable() {
    let facility = CalculationFacility::remote("not a url", reqwest::Client::new());
    assert!(!facility.is_available());
    let assembler = PanchangAssembler::new(Arc::new(facility), disabled_recorder());

    let result = assembler.assemble(request()).await.expect("assembly succeeds");

    assert_eq!(result.raw.len(), 1);
    let error = result.raw.get("error").expect("error recorded");
    assert!(error
        .as_str()
        .expect("error is text")
        .starts_with("vedastro not installed on server: invalid calculation backend URL"));
}
