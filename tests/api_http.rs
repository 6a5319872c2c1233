// tests/api_http.rs
//
// HTTP surface tests via `tower::ServiceExt::oneshot` — no sockets, no
// network; the engine runs on mock collaborators.

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use http::{header, Request, StatusCode};
use tower::ServiceExt; // for `oneshot`

use authenticity_analyzer::analyze::HotReloadPolicy;
use authenticity_analyzer::api::{create_router, AppState};
use authenticity_analyzer::attributes::ExtractedAttributes;
use authenticity_analyzer::engine::VerificationEngine;
use authenticity_analyzer::history::History;
use authenticity_analyzer::presence::{MockProber, PresenceResult, SearchHit};
use authenticity_analyzer::vision::{ExtractionOutcome, MockExtractor};

fn test_router(outcome: ExtractionOutcome, presence: PresenceResult) -> axum::Router {
    let engine = VerificationEngine::new(
        Arc::new(MockExtractor { outcome }),
        Arc::new(MockProber { fixed: presence }),
        Arc::new(HotReloadPolicy::new(Some(Path::new("no/policy/here.json")))),
    );
    create_router(AppState {
        engine: Arc::new(engine),
        history: Arc::new(History::with_capacity(100)),
    })
}

fn strong_outcome() -> ExtractionOutcome {
    ExtractionOutcome::Parsed(ExtractedAttributes {
        brand_name: "Acme".to_string(),
        packaging_quality: "excellent".to_string(),
        image_quality: "good".to_string(),
        text_clarity: "good".to_string(),
        legitimacy_indicators: vec!["hologram".to_string()],
        ..Default::default()
    })
}

fn strong_presence() -> PresenceResult {
    PresenceResult {
        success: true,
        has_official_website: true,
        total_results: 10,
        results: vec![SearchHit {
            title: "Acme official site".to_string(),
            link: "https://acme.example".to_string(),
            snippet: String::new(),
        }],
    }
}

fn verify_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/verify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"image":"aW1hZ2U="}"#))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let router = test_router(strong_outcome(), strong_presence());
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn verify_returns_a_full_report() {
    let router = test_router(strong_outcome(), strong_presence());
    let resp = router.oneshot(verify_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), 256 * 1024).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(v["success"], serde_json::json!(true));
    assert_eq!(v["verified"], serde_json::json!(true));
    assert_eq!(v["riskLevel"], serde_json::json!("low"));
    assert_eq!(v["confidence"], v["scoring"]["overall"]);
    assert!(v["recommendations"].is_array());
    assert_eq!(v["webSearch"]["hasOfficialWebsite"], serde_json::json!(true));
}

#[tokio::test]
async fn verify_surfaces_extraction_failure_without_scores() {
    let router = test_router(
        ExtractionOutcome::Failed {
            reason: "no usable reply".to_string(),
        },
        strong_presence(),
    );
    let resp = router.oneshot(verify_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), 256 * 1024).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(v["success"], serde_json::json!(false));
    assert_eq!(
        v["error"],
        serde_json::json!("Failed to extract product information from image")
    );
    assert!(v.get("scoring").is_none());
    assert!(v.get("riskLevel").is_none());
}

#[tokio::test]
async fn debug_history_records_successful_verifications() {
    let router = test_router(strong_outcome(), strong_presence());

    let resp = router.clone().oneshot(verify_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = router
        .oneshot(
            Request::builder()
                .uri("/debug/history?n=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), 256 * 1024).await.unwrap();
    let entries: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let arr = entries.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["brandName"], serde_json::json!("Acme"));
    assert_eq!(arr[0]["riskLevel"], serde_json::json!("low"));
}

#[tokio::test]
async fn debug_policy_exposes_the_active_thresholds() {
    let router = test_router(strong_outcome(), strong_presence());
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/debug/policy")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), 256 * 1024).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["risk"]["lowMinScore"], serde_json::json!(80));
    assert_eq!(v["weights"]["packagingQuality"], serde_json::json!(0.25));
    assert_eq!(v["rewardMinScore"], serde_json::json!(70));
}
