//! Error types for the Mirador server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Body sent when the upstream answered with a non-success status
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch PDF";

/// Body sent for every transport or runtime failure
pub const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

/// Proxy error type
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Upstream responded, but not with a success status
    #[error("Upstream returned {0}")]
    UpstreamStatus(StatusCode),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Transport(msg) => ProxyError::Transport(msg),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProxyError::UpstreamStatus(status) => {
                tracing::warn!("Upstream PDF fetch failed with status {}", status);
                (*status, UPSTREAM_FAILURE_MESSAGE)
            }
            ProxyError::Transport(msg) => {
                tracing::error!("PDF proxy error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_FAILURE_MESSAGE)
            }
            ProxyError::Internal(msg) => {
                tracing::error!("PDF proxy error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_FAILURE_MESSAGE)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_status_is_propagated() {
        let response = ProxyError::UpstreamStatus(StatusCode::NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, r#"{"error":"Failed to fetch PDF"}"#);
    }

    #[tokio::test]
    async fn test_transport_error_hides_details() {
        let response =
            ProxyError::Transport("connection refused (os error 111)".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, r#"{"error":"Internal server error"}"#);
    }
}
