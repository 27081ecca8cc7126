use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Emits one `api_request` event per request. Server errors log at warn so
/// they stand out from routine traffic.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(method = %method, path = %path, status = status.as_u16(), latency_ms, "api_request");
    } else {
        tracing::info!(method = %method, path = %path, status = status.as_u16(), latency_ms, "api_request");
    }

    response
}
