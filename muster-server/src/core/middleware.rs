//! Request middleware
//!
//! Two concerns live here: structured request logging, and stamping the
//! request path and id into error envelopes produced by handlers.

use axum::{
    Json,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use shared::error::{AppError, ErrorEnvelope};

fn request_id_of(req: &Request) -> String {
    req.headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Re-render error responses with the request path and id.
///
/// `AppError::into_response` leaves the error in the response extensions;
/// this middleware rebuilds the envelope so clients can correlate failures
/// without the handler ever knowing about request context.
pub async fn error_envelope_middleware(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let request_id = request_id_of(&req);

    let response = next.run(req).await;

    match response.extensions().get::<AppError>().cloned() {
        Some(err) => {
            let status = err.http_status();
            let envelope = ErrorEnvelope::new(&err, path, request_id);
            (status, Json(envelope)).into_response()
        }
        None => response,
    }
}

/// Request logging middleware
///
/// Records request start and completion with:
/// - request id (x-request-id)
/// - HTTP method and matched path
/// - response status code
/// - latency in milliseconds
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = request_id_of(&req);
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Request started"
    );

    let response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed with client error"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed successfully"
        );
    }

    response
}
