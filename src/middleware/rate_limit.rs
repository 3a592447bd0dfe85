//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client IP and endpoint bucket.
//! When Redis is unreachable requests are let through.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;

use crate::{constants::rate_limits, error::AppError, state::AppState};

/// Limit for one endpoint bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Limit {
    bucket: &'static str,
    max_requests: i64,
    window_secs: i64,
}

/// Rate limit middleware for the credential endpoints
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(limit) = limit_for(request.uri().path()) else {
        return Ok(next.run(request).await);
    };

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let key = format!("rate_limit:{}:{}", limit.bucket, client);

    match hit(&state, &key, limit.window_secs).await {
        Ok(count) if count > limit.max_requests => {
            tracing::warn!(client = %client, bucket = limit.bucket, "Rate limit exceeded");
            return Err(AppError::TooManyRequests);
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Rate limiter unavailable, allowing request"),
    }

    Ok(next.run(request).await)
}

/// Count one request, starting the window on the first hit
async fn hit(state: &AppState, key: &str, window_secs: i64) -> Result<i64, AppError> {
    let mut redis = state.redis().await?;
    let count: i64 = redis.incr(key, 1).await?;
    if count == 1 {
        redis.expire::<_, ()>(key, window_secs).await?;
    }
    Ok(count)
}

fn limit_for(path: &str) -> Option<Limit> {
    if path.ends_with("/auth/login") {
        Some(Limit {
            bucket: "login",
            max_requests: rate_limits::LOGIN_MAX_REQUESTS,
            window_secs: rate_limits::LOGIN_WINDOW_SECS,
        })
    } else if path.ends_with("/auth/refresh") {
        Some(Limit {
            bucket: "refresh",
            max_requests: rate_limits::REFRESH_MAX_REQUESTS,
            window_secs: rate_limits::REFRESH_WINDOW_SECS,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_credential_endpoints_are_limited() {
        assert_eq!(limit_for("/api/v1/auth/login").map(|l| l.bucket), Some("login"));
        assert_eq!(limit_for("/api/v1/auth/refresh").map(|l| l.bucket), Some("refresh"));
        assert_eq!(limit_for("/api/v1/auth/me"), None);
        assert_eq!(limit_for("/api/v1/events"), None);
    }
}
