//! Admin handlers
//!
//! Every route here sits behind the bearer token check, which runs before
//! any handler touches the store.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{middleware::auth_middleware, state::AppState};

/// Admin routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Events
        .route("/events", post(handler::create_event))
        .route(
            "/events/{id}",
            put(handler::update_event).delete(handler::delete_event),
        )
        // Records
        .route(
            "/events/{id}/records",
            put(handler::replace_records).delete(handler::clear_records),
        )
        .route("/events/{id}/records/upload", post(handler::upload_records))
        .route("/records/template", get(handler::download_template))
        // Posters
        .route("/posters", post(handler::create_poster))
        .route(
            "/posters/{id}",
            put(handler::update_poster).delete(handler::delete_poster),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
