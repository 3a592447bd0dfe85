//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod home;
pub mod posters;

use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{constants::API_BASE_PATH, middleware::logging_middleware, state::AppState};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(home::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/events", events::routes())
        .nest("/posters", posters::routes())
        .nest("/admin", admin::routes(state))
}

/// Full application router with the shared middleware stack
pub fn router(state: AppState) -> Router {
    let max_body = state.config().upload.max_bytes;

    Router::new()
        .nest(API_BASE_PATH, routes(state.clone()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
