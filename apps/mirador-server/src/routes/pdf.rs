//! PDF proxy endpoint
//!
//! Re-serves the fixed upstream document so the browser viewer can load it
//! without tripping cross-origin restrictions.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::Response,
    routing::get,
    Router,
};

use crate::error::{ProxyError, Result};
use crate::state::AppState;
use crate::upstream::UpstreamResponse;

/// Create the PDF proxy router
///
/// Serves `/` and any trailing file name, e.g. `/mirador-los-volcanes-panguipulli.pdf`.
/// The trailing segment does not select anything; the resource is fixed.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(proxy_pdf))
        .route("/*file", get(proxy_pdf))
        .layer(middleware::map_response(cors_headers))
}

/// Stamp the permissive CORS headers onto every proxy response, errors included
async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Fetch the upstream PDF and stream it back unchanged
async fn proxy_pdf(State(state): State<AppState>) -> Result<Response> {
    let source = state.pdf_source();
    tracing::debug!("Proxying PDF from {}", source.url());

    let (content_length, bytes) = match source.fetch().await? {
        UpstreamResponse::Success { content_length, bytes } => (content_length, bytes),
        UpstreamResponse::Failed { status } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            return Err(ProxyError::UpstreamStatus(status));
        }
    };

    let actual = bytes.len() as u64;
    let length = match content_length {
        Some(declared) if declared == actual => declared,
        Some(declared) => {
            tracing::warn!(
                "Upstream declared Content-Length {} but sent {} bytes",
                declared,
                actual
            );
            actual
        }
        None => actual,
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, length)
        .body(Body::from(bytes))
        .map_err(|e| ProxyError::Internal(e.to_string()))
}
