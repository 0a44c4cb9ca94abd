//! HTTP backend tests against an in-process mock server.

use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use folio_engine::{
    ChatBackend, ChatConfig, ChatRequest, ChatWidget, HttpBackend, RequestFailure, SendOutcome,
};
use serde_json::json;

/// Serve `router` on an ephemeral port and return the chat endpoint URL.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/chat")
}

fn backend_for(url: &str) -> HttpBackend {
    HttpBackend::new(&ChatConfig::from_url(url).unwrap()).unwrap()
}

/// Router that echoes the message and records every request body.
fn echo_router(seen: Arc<Mutex<Vec<ChatRequest>>>) -> Router {
    Router::new().route(
        "/chat",
        post(move |Json(request): Json<ChatRequest>| {
            let seen = Arc::clone(&seen);
            async move {
                let reply = format!("echo: {}", request.message);
                seen.lock().unwrap().push(request);
                Json(json!({ "response": reply, "sources": ["resume.txt"] }))
            }
        }),
    )
}

#[tokio::test]
async fn test_send_success_ignores_sources() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let url = spawn_server(echo_router(Arc::clone(&seen))).await;
    let backend = backend_for(&url);

    let response = backend
        .send(ChatRequest::new("What are the projects?", &[]))
        .await
        .unwrap();

    assert_eq!(response.response, "echo: What are the projects?");
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_widget_round_trip_carries_history() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let url = spawn_server(echo_router(Arc::clone(&seen))).await;
    let backend = backend_for(&url);
    let mut widget = ChatWidget::new();

    widget.set_draft("first");
    assert_eq!(
        widget.send(&backend).await,
        SendOutcome::Answered("echo: first".into())
    );
    widget.set_draft("second");
    widget.send(&backend).await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].history.is_empty());
    assert_eq!(
        seen[1].history,
        vec![("first".to_string(), "echo: first".to_string())]
    );
    assert_eq!(widget.turns().len(), 2);
    assert!(widget.draft().is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let router = Router::new().route(
        "/chat",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_server(router).await;
    let backend = backend_for(&url);

    let err = backend
        .send(ChatRequest::new("hello", &[]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RequestFailure::Status {
            status: 500,
            body: "boom".into()
        }
    );
    assert_eq!(err.user_message(), "Request failed with status code 500");
}

#[tokio::test]
async fn test_malformed_body_is_failure() {
    let router = Router::new().route("/chat", post(|| async { "definitely not json" }));
    let url = spawn_server(router).await;
    let backend = backend_for(&url);
    let mut widget = ChatWidget::new();
    widget.set_draft("hello");

    let outcome = widget.send(&backend).await;

    assert!(matches!(outcome, SendOutcome::Failed(ref msg) if msg.starts_with("Invalid response")));
    assert_eq!(widget.draft(), "hello");
    assert!(widget.turns().is_empty());
}

#[tokio::test]
async fn test_missing_response_field_is_failure() {
    let router = Router::new().route(
        "/chat",
        post(|| async { Json(json!({ "sources": [] })) }),
    );
    let url = spawn_server(router).await;
    let backend = backend_for(&url);

    let err = backend
        .send(ChatRequest::new("hello", &[]))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestFailure::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = backend_for(&format!("http://{addr}/chat"));
    let mut widget = ChatWidget::new();
    widget.set_draft("is anyone home?");

    let outcome = widget.send(&backend).await;

    assert!(matches!(outcome, SendOutcome::Failed(_)));
    assert!(widget.error().is_some());
    assert_eq!(widget.draft(), "is anyone home?");
    assert!(!widget.is_in_flight());
}

#[tokio::test]
async fn test_health_probe() {
    let router = Router::new().route("/health", get(|| async { Json(json!({ "ok": true })) }));
    let url = spawn_server(router).await;
    let backend = backend_for(&url);

    let health = backend.health().await.unwrap();

    assert!(health.ok);
}

#[tokio::test]
async fn test_health_probe_missing_endpoint() {
    let url = spawn_server(Router::new()).await;
    let backend = backend_for(&url);

    let err = backend.health().await.unwrap_err();

    assert!(matches!(err, RequestFailure::Status { status: 404, .. }));
}
