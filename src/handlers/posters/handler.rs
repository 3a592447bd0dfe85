//! Poster handler implementations

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{error::AppResult, models::Poster, services::PosterService, state::AppState};

use super::request::ListPostersQuery;

/// List posters of one slider, or every poster
pub async fn list_posters(
    State(state): State<AppState>,
    Query(query): Query<ListPostersQuery>,
) -> AppResult<Json<Vec<Poster>>> {
    let poster_type = query
        .poster_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let posters = PosterService::list(state.db(), poster_type).await?;
    Ok(Json(posters))
}
