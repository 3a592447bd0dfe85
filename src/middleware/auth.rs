//! Authentication middleware
//!
//! Admin routes are wrapped in [`auth_middleware`], which verifies the bearer
//! token and places an [`AuthenticatedAdmin`] in the request extensions.
//! Handlers that mutate state take the extractor as an argument, so the
//! session lives exactly as long as the request.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{error::AppError, services::AuthService, state::AppState};

/// Admin identity taken from a verified access token
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedAdmin {
    pub id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            debug!(path = %path, "Auth failed: missing or malformed bearer token");
            AppError::Unauthorized
        })?;

    let claims = AuthService::verify_token(token, &state.config().jwt.secret).map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: token verification failed");
        e
    })?;

    let admin_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        debug!(path = %path, sub = %claims.sub, "Auth failed: invalid admin ID in token");
        AppError::InvalidToken
    })?;

    debug!(path = %path, admin_id = %admin_id, "Admin authenticated");
    request.extensions_mut().insert(AuthenticatedAdmin {
        id: admin_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("bearer abc"), None);
    }
}
