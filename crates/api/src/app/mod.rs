//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the shared product store and mutation logging
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and envelopes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over a freshly seeded product store.
pub fn build_app() -> Router {
    build_app_with_services(Arc::new(services::build_services()))
}

/// Build the router over caller-provided services (tests share state this way).
pub fn build_app_with_services(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_trace))
                .layer(Extension(services)),
        )
}
