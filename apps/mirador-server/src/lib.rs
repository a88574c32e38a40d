//! Mirador Server Library
//!
//! Router construction and the proxy internals, exposed for the binary in
//! main.rs and for integration tests.
//!
//! # Modules
//!
//! - `routes`: HTTP handlers (`/api/pdf`, `/health`)
//! - `upstream`: Single-attempt fetch of the fixed remote PDF
//! - `config`: Environment-driven configuration

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    // Answers preflight requests; simple responses get their headers from the proxy router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/health", routes::health::router())
        .nest("/api/pdf", routes::pdf::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
