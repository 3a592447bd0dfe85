//! Landing page handler

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{EventWithCount, Poster},
    services::HomeService,
    state::AppState,
};

/// Landing page payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub hero_posters: Vec<Poster>,
    pub next_posters: Vec<Poster>,
    pub past_events: Vec<EventWithCount>,
}

async fn home(State(state): State<AppState>) -> AppResult<Json<HomeResponse>> {
    let page = HomeService::load(state.db()).await?;

    Ok(Json(HomeResponse {
        hero_posters: page.hero_posters,
        next_posters: page.next_posters,
        past_events: page.past_events,
    }))
}

/// Home routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/home", get(home))
}
