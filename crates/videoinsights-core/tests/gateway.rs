use std::time::Duration;

use serde_json::json;
use videoinsights_core::{
    AppConfig, AuthHeader, Credential, GatewayError, GeminiGateway, MediaRef, ModelGateway,
    build_request,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const ENDPOINT_PATH: &str = "/v1beta/models/test:generateContent";

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        endpoint: format!("{}{}", server.uri(), ENDPOINT_PATH),
        timeout_secs: 5,
        ..AppConfig::default()
    }
}

fn answer(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {"content": {"parts": [{"text": text}], "role": "model"}}
        ]
    })
}

fn credential() -> Credential {
    Credential::new("test-key").unwrap()
}

fn request() -> videoinsights_core::ProviderRequest {
    let media = MediaRef::from_url("https://youtu.be/abc123").unwrap();
    build_request(&media, "auto").unwrap()
}

#[tokio::test]
async fn returns_answer_text_with_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {"temperature": 0.4, "maxOutputTokens": 2048}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("Title: Hello")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = GeminiGateway::new(&config_for(&server)).unwrap();
    let text = gateway.send(&request(), Some(&credential())).await.unwrap();
    assert_eq!(text, "Title: Hello");
}

#[tokio::test]
async fn api_key_header_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig {
        auth_header: AuthHeader::ApiKey,
        ..config_for(&server)
    };
    let gateway = GeminiGateway::new(&config).unwrap();
    assert_eq!(
        gateway.send(&request(), Some(&credential())).await.unwrap(),
        "ok"
    );
}

#[tokio::test]
async fn missing_credential_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = GeminiGateway::new(&config_for(&server)).unwrap();
    let err = gateway.send(&request(), None).await.unwrap_err();
    assert!(matches!(err, GatewayError::Auth));
}

#[tokio::test]
async fn non_success_status_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let gateway = GeminiGateway::new(&config_for(&server)).unwrap();
    let err = gateway
        .send(&request(), Some(&credential()))
        .await
        .unwrap_err();
    match err {
        GatewayError::Provider { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "API key not valid");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let gateway = GeminiGateway::new(&config_for(&server)).unwrap();
    let err = gateway
        .send(&request(), Some(&credential()))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::EmptyResponse));
}

#[tokio::test]
async fn blank_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("   ")))
        .mount(&server)
        .await;

    let gateway = GeminiGateway::new(&config_for(&server)).unwrap();
    let err = gateway
        .send(&request(), Some(&credential()))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::EmptyResponse));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let gateway = GeminiGateway::new(&config_for(&server)).unwrap();
    let err = gateway
        .send(&request(), Some(&credential()))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_provider_hits_the_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(answer("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = AppConfig {
        timeout_secs: 1,
        ..config_for(&server)
    };
    let gateway = GeminiGateway::new(&config).unwrap();
    let err = gateway
        .send(&request(), Some(&credential()))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport { timed_out: true, .. }));
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    let config = AppConfig {
        endpoint: "http://127.0.0.1:1/v1beta/models/test:generateContent".to_string(),
        timeout_secs: 5,
        ..AppConfig::default()
    };
    let gateway = GeminiGateway::new(&config).unwrap();
    let err = gateway
        .send(&request(), Some(&credential()))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));
}
