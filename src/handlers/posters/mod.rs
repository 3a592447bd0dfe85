//! Poster handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Public poster routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::list_posters))
}
