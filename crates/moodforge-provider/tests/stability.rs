//! Stability client integration tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moodforge_provider::{ExpressionProvider, ProviderError, ProviderRequest, StabilityClient};

fn test_request() -> ProviderRequest {
    ProviderRequest::new(
        vec![0u8; 16],
        "extreme shock, wide eyes",
        "blurry, low quality",
        "Ultra Shock",
    )
}

#[tokio::test]
async fn successful_generation_returns_data_uri() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/generation/stable-diffusion-v1-6/image-to-image"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artifacts": [{ "base64": "aGVsbG8=" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StabilityClient::new(server.uri(), "sk-test", "stable-diffusion-v1-6");
    let image = client.generate(&test_request()).await.unwrap();

    assert_eq!(image.as_str(), "data:image/png;base64,aGVsbG8=");
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "invalid api key"
        })))
        .mount(&server)
        .await;

    let client = StabilityClient::new(server.uri(), "sk-bad", "stable-diffusion-v1-6");
    let err = client.generate(&test_request()).await.unwrap_err();

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid api key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_without_body_still_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = StabilityClient::new(server.uri(), "sk-test", "stable-diffusion-v1-6");
    let err = client.generate(&test_request()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Api { status: 500, .. }));
}

#[tokio::test]
async fn empty_artifact_list_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "artifacts": [] })))
        .mount(&server)
        .await;

    let client = StabilityClient::new(server.uri(), "sk-test", "stable-diffusion-v1-6");
    let err = client.generate(&test_request()).await.unwrap_err();

    assert!(matches!(err, ProviderError::MalformedPayload(_)));
}

#[tokio::test]
async fn invalid_base64_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artifacts": [{ "base64": "!!not-base64!!" }]
        })))
        .mount(&server)
        .await;

    let client = StabilityClient::new(server.uri(), "sk-test", "stable-diffusion-v1-6");
    let err = client.generate(&test_request()).await.unwrap_err();

    assert!(matches!(err, ProviderError::MalformedPayload(_)));
}

#[tokio::test]
async fn unexpected_body_shape_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let client = StabilityClient::new(server.uri(), "sk-test", "stable-diffusion-v1-6");
    let err = client.generate(&test_request()).await.unwrap_err();

    assert!(matches!(err, ProviderError::MalformedPayload(_)));
}
