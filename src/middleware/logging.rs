//! Request logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};

/// Log one line per request with its outcome and latency
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if is_noteworthy(status) {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = %latency_ms,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = %latency_ms,
            "Request completed"
        );
    }

    response
}

/// Server errors and client errors other than a plain miss
fn is_noteworthy(status: StatusCode) -> bool {
    status.is_server_error() || (status.is_client_error() && status != StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_noteworthy() {
        assert!(!is_noteworthy(StatusCode::OK));
        assert!(!is_noteworthy(StatusCode::NOT_FOUND));
        assert!(is_noteworthy(StatusCode::BAD_REQUEST));
        assert!(is_noteworthy(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
