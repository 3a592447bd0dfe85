//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    middleware::{auth_middleware, rate_limit_middleware},
    state::AppState,
};

/// Authentication routes
pub fn routes(state: AppState) -> Router<AppState> {
    let credentials = Router::new()
        .route("/login", post(handler::login))
        .route("/refresh", post(handler::refresh_token))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let session = Router::new()
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::get_current_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    credentials.merge(session)
}
