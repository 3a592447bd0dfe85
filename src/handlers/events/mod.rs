//! Public event and record handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Event routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_events))
        .route("/{id}", get(handler::get_event))
        // Records
        .route("/{id}/records", get(handler::list_records))
        .route("/{id}/records/search", get(handler::search_records))
        .route("/{id}/records/{bib}", get(handler::get_record))
}
