#![cfg(not(target_arch = "wasm32"))]

use sentsay_widget::{Backend, GenerationRequest, HttpBackend, WidgetError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FALLBACK: &str = "Request failed";

fn request() -> GenerationRequest {
    GenerationRequest {
        message: "running late".into(),
        situation: "dating".into(),
        tone: "Flirty".into(),
    }
}

// Only matches the exact wire shape the widget must send.
async fn mount_generate(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "message": "running late",
            "situation": "dating",
            "tone": "Flirty",
        })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn success_returns_options_from_the_endpoint() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "options": ["On my way!", "Ten minutes out", "Save me a seat", "Almost there"],
            "raw": "[...]",
        })),
    )
    .await;

    let backend = HttpBackend::new(&server.uri(), "/api/generate", FALLBACK).unwrap();
    let options = backend.generate(&request()).await.unwrap();
    assert_eq!(
        options,
        vec!["On my way!", "Ten minutes out", "Save me a seat", "Almost there"]
    );
}

#[tokio::test]
async fn failure_status_carries_backend_error() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({ "error": "too long" })),
    )
    .await;

    let backend = HttpBackend::new(&server.uri(), "/api/generate", FALLBACK).unwrap();
    let err = backend.generate(&request()).await.unwrap_err();
    assert_eq!(err, WidgetError::Request("too long".into()));
}

#[tokio::test]
async fn failure_status_without_error_uses_fallback() {
    let server = MockServer::start().await;
    mount_generate(&server, ResponseTemplate::new(500).set_body_json(json!({}))).await;

    let backend = HttpBackend::new(&server.uri(), "/api/generate", FALLBACK).unwrap();
    let err = backend.generate(&request()).await.unwrap_err();
    assert_eq!(err, WidgetError::Request(FALLBACK.into()));
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
    )
    .await;

    let backend = HttpBackend::new(&server.uri(), "/api/generate", FALLBACK).unwrap();
    let err = backend.generate(&request()).await.unwrap_err();
    assert!(matches!(err, WidgetError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let backend =
        HttpBackend::new(&format!("http://127.0.0.1:{port}"), "/api/generate", FALLBACK).unwrap();
    let err = backend.generate(&request()).await.unwrap_err();
    assert!(matches!(err, WidgetError::Transport(ref msg) if !msg.is_empty()), "{err:?}");
}
