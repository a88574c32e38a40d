//! HTTP contract tests for the assembled router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum_test::TestServer;
use bytes::Bytes;
use tower::ServiceExt;

use mirador_server::config::Config;
use mirador_server::state::AppState;
use mirador_server::upstream::{PdfSource, UpstreamError, UpstreamResponse};

struct FixedSource(Option<UpstreamResponse>);

#[async_trait]
impl PdfSource for FixedSource {
    fn url(&self) -> &str {
        "fixed://doc.pdf"
    }

    async fn fetch(&self) -> Result<UpstreamResponse, UpstreamError> {
        self.0
            .clone()
            .ok_or_else(|| UpstreamError::Transport("dns failure".to_string()))
    }
}

fn app(response: Option<UpstreamResponse>) -> axum::Router {
    let state = AppState::with_source(Config::default(), Arc::new(FixedSource(response)));
    mirador_server::app(state)
}

#[tokio::test]
async fn health_reports_service() {
    let server = TestServer::new(app(None)).unwrap();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mirador-server");
}

#[tokio::test]
async fn proxy_serves_pdf_through_full_stack() {
    let payload = Bytes::from_static(b"%PDF-1.4\n%mirador\n");
    let server = TestServer::new(app(Some(UpstreamResponse::Success {
        content_length: Some(payload.len() as u64),
        bytes: payload.clone(),
    })))
    .unwrap();

    let response = server.get("/api/pdf").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header(header::CONTENT_TYPE), "application/pdf");
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    assert_eq!(response.as_bytes(), &payload);
}

#[tokio::test]
async fn proxy_forwards_upstream_status() {
    let server = TestServer::new(app(Some(UpstreamResponse::Failed { status: 404 }))).unwrap();

    let response = server.get("/api/pdf/mirador-los-volcanes-panguipulli.pdf").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>(),
        serde_json::json!({ "error": "Failed to fetch PDF" })
    );
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_METHODS), "GET");
}

#[tokio::test]
async fn proxy_masks_transport_failures() {
    let server = TestServer::new(app(None)).unwrap();

    let response = server.get("/api/pdf").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>(),
        serde_json::json!({ "error": "Internal server error" })
    );
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_HEADERS), "Content-Type");
}

#[tokio::test]
async fn preflight_allows_get_from_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/pdf")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app(None).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
}
