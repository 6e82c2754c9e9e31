// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! VisionClient against a mocked OpenAI-compatible provider

use hardware_scanner::{
    config::VisionConfig,
    vision::{HardwareExtractor, LabelImage, VisionClient, VisionError},
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

fn client_for(server: &MockServer) -> VisionClient {
    let config = VisionConfig {
        endpoint: server.uri(),
        model: "test-vision-model".to_string(),
        api_key: Some("gsk_test".to_string()),
        request_timeout_secs: 5,
        ..VisionConfig::default()
    };
    VisionClient::new(&config).unwrap()
}

fn label() -> LabelImage {
    LabelImage::from_base64(TINY_PNG_BASE64, 1024 * 1024).unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 900, "completion_tokens": 40, "total_tokens": 940}
    })
}

#[tokio::test]
async fn test_successful_extraction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({
            "model": "test-vision-model",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"form_factor": "SODIMM", "capacity": "8GB", "generation": "DDR4", "brand": "Crucial", "speed": 2666}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let extraction = client_for(&server).extract(&label()).await.unwrap();

    assert_eq!(extraction.info.brand, "Crucial");
    assert_eq!(extraction.info.capacity, "8GB");
    assert_eq!(extraction.info.generation, "DDR4");
    assert_eq!(extraction.info.speed, "2666");
    assert_eq!(extraction.info.form_factor, "SODIMM");
    assert_eq!(extraction.raw["speed"], 2666);
    assert_eq!(extraction.model, "test-vision-model");
    assert_eq!(extraction.tokens_used, 940);
}

#[tokio::test]
async fn test_missing_fields_become_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(r#"{"brand": "Samsung", "speed": null}"#)),
        )
        .mount(&server)
        .await;

    let extraction = client_for(&server).extract(&label()).await.unwrap();

    assert_eq!(extraction.info.brand, "Samsung");
    assert_eq!(extraction.info.capacity, "N/A");
    assert_eq!(extraction.info.speed, "N/A");
    assert_eq!(extraction.info.form_factor, "N/A");
}

#[tokio::test]
async fn test_provider_rejects_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "Invalid API Key"}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).extract(&label()).await.unwrap_err();

    match err {
        VisionError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API Key"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("I could not read the label, sorry.")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).extract(&label()).await.unwrap_err();
    assert!(matches!(err, VisionError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_empty_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).extract(&label()).await.unwrap_err();
    assert!(matches!(err, VisionError::EmptyResponse));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", "Bearer gsk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    assert!(client_for(&server).health_check().await);
}

#[tokio::test]
async fn test_health_check_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client_for(&server).health_check().await);
}
