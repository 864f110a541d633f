use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, warn};

use super::request_id::X_REQUEST_ID;

/// Log failed requests; 404s are expected traffic and only show at debug.
pub async fn log_errors(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req.uri().path().to_string();
    let method = req.method().to_string();
    let request_id = req
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        error!(
            "Server error: {} {} - Status: {} - Request: {} - Duration: {:?}",
            method, path, status, request_id, elapsed
        );
    } else if status == StatusCode::NOT_FOUND {
        debug!("Not found: {} {} - Request: {}", method, path, request_id);
    } else if status.is_client_error() {
        warn!(
            "Client error: {} {} - Status: {} - Request: {} - Duration: {:?}",
            method, path, status, request_id, elapsed
        );
    }

    response
}
