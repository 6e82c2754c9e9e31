// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /api/process-image and POST /api/upload-image

use super::support::*;
use axum::http::StatusCode;
use hardware_scanner::api::http_server::{create_app, AppState};
use serde_json::json;

fn scan(session_id: &str, image_base64: &str) -> axum::http::Request<axum::body::Body> {
    json_request(
        "POST",
        "/api/process-image",
        json!({"session_id": session_id, "image_base64": image_base64}),
    )
}

#[tokio::test]
async fn test_scan_creates_session_and_counts() {
    let extractor = StubExtractor::returning(ddr4_stick());
    let app = create_app(state_with(extractor.clone()).await);

    let (status, first) = send_json(app.clone(), scan("fresh", &png_base64())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["scan_count"], 1);
    assert_eq!(first["data"]["brand"], "Kingston");
    assert_eq!(first["data"]["speed"], "3200");
    assert!(first["data"]["timestamp"].is_string());

    let (_, second) = send_json(app.clone(), scan("fresh", &png_base64())).await;
    assert_eq!(second["scan_count"], 2);

    let (_, session) = send_json(app, empty_request("GET", "/api/session/fresh")).await;
    assert_eq!(session["items"].as_array().unwrap().len(), 2);
    assert_eq!(extractor.calls(), 2);
}

#[tokio::test]
async fn test_data_url_prefix_accepted() {
    let app = create_app(state_with(StubExtractor::returning(ddr4_stick())).await);
    let data_url = format!("data:image/png;base64,{}", png_base64());

    let (_, body) = send_json(app, scan("prefixed", &data_url)).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_provider_failure_reported_in_body() {
    let app = create_app(state_with(StubExtractor::failing(429)).await);

    let (status, body) = send_json(app.clone(), scan("busy", &png_base64())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert!(body["error"].as_str().unwrap().contains("429"));
    assert_eq!(body["scan_count"], 0);

    let (status, session) = send_json(app, empty_request("GET", "/api/session/busy")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["scan_count"], 0);
}

#[tokio::test]
async fn test_invalid_image_never_reaches_extractor() {
    let extractor = StubExtractor::returning(ddr4_stick());
    let app = create_app(state_with(extractor.clone()).await);

    let (status, body) = send_json(app, scan("junk", "%%%not-base64%%%")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid image"));
    assert_eq!(extractor.calls(), 0);
}

#[tokio::test]
async fn test_without_api_key() {
    let app = create_app(AppState::new_for_test());

    let (status, body) = send_json(app, scan("nokey", &png_base64())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "GROQ_API_KEY not configured");
}

#[tokio::test]
async fn test_missing_field_is_client_error() {
    let app = create_app(AppState::new_for_test());

    let (status, _, _) = send(
        app,
        json_request("POST", "/api/process-image", json!({"session_id": "x"})),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_multipart_upload() {
    let app = create_app(state_with(StubExtractor::returning(ddr4_stick())).await);
    let png = png_bytes();

    let (status, body) = send_json(app.clone(), multipart_request(Some("upload-1"), Some(&png))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["form_factor"], "DIMM");
    assert_eq!(body["scan_count"], 1);

    let (_, session) = send_json(app, empty_request("GET", "/api/session/upload-1")).await;
    assert_eq!(session["scan_count"], 1);
}

#[tokio::test]
async fn test_multipart_missing_parts() {
    let app = create_app(state_with(StubExtractor::returning(ddr4_stick())).await);
    let png = png_bytes();

    let (status, body) = send_json(app.clone(), multipart_request(None, Some(&png))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "session_id");

    let (status, body) = send_json(app, multipart_request(Some("upload-2"), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "image");
}

#[tokio::test]
async fn test_json_and_multipart_share_session_ids() {
    let app = create_app(state_with(StubExtractor::returning(ddr4_stick())).await);
    let png = png_bytes();

    let (_, first) = send_json(app.clone(), multipart_request(Some(" pad "), Some(&png))).await;
    assert_eq!(first["scan_count"], 1);

    let (_, second) = send_json(app.clone(), scan(" pad ", &png_base64())).await;
    assert_eq!(second["scan_count"], 2);

    let (status, _) = send_json(app, empty_request("GET", "/api/session/pad")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
