//! HTTP API modules and router assembly
//!
//! # Structure
//!
//! - [`health`] - service banner and health check
//! - [`users`] - user management
//! - [`events`] - event management
//! - [`registrations`] - register/unregister/list (user- and event-centric)

pub mod events;
pub mod health;
pub mod registrations;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::core::middleware;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(events::router())
        .merge(registrations::router())
}

/// Build the fully configured application with all middleware
pub fn build_app() -> Router<ServerState> {
    build_router()
        // CORS - permissive by default
        .layer(CorsLayer::permissive())
        // Gzip compress responses
        .layer(CompressionLayer::new())
        // Stamp path/request id into error envelopes
        .layer(axum_middleware::from_fn(
            middleware::error_envelope_middleware,
        ))
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Generate a unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate the request ID to the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
