//! Event handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    db::repositories::RecordFilter,
    error::{AppError, AppResult},
    models::{EventStatus, EventWithCount},
    services::{EventService, RecordService},
    state::AppState,
};

use super::{
    request::{ListEventsQuery, ListRecordsQuery, SearchRecordsQuery},
    response::{EventListResponse, RecordDetailResponse, RecordListResponse, SearchResponse},
};

/// List events, newest first
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> AppResult<Json<EventListResponse>> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.parse::<EventStatus>().map_err(|_| {
            AppError::Validation(format!(
                "Unknown event status '{s}'. Use 'upcoming', 'active' or 'past'"
            ))
        })?),
    };

    let events = EventService::list(state.db(), status).await?;
    Ok(Json(EventListResponse { events }))
}

/// Get one event
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EventWithCount>> {
    let event = EventService::get(state.db(), &id).await?;
    Ok(Json(event))
}

/// List an event's records, optionally filtered
pub async fn list_records(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListRecordsQuery>,
) -> AppResult<Json<RecordListResponse>> {
    let filter = RecordFilter {
        bib: non_blank(&query.bib),
        name: non_blank(&query.name),
        course: non_blank(&query.course),
    };

    let records = RecordService::list(state.db(), &id, &filter).await?;
    Ok(Json(RecordListResponse {
        event_id: id,
        total: records.len(),
        records,
    }))
}

/// Search an event's records by bib or name
pub async fn search_records(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SearchRecordsQuery>,
) -> AppResult<Json<SearchResponse>> {
    let outcome = RecordService::search(state.db(), &id, &query.q).await?;
    Ok(Json(outcome.into()))
}

/// One record with its ranking
pub async fn get_record(
    State(state): State<AppState>,
    Path((id, bib)): Path<(Uuid, String)>,
) -> AppResult<Json<RecordDetailResponse>> {
    let detail = RecordService::detail(state.db(), &id, bib.trim()).await?;
    Ok(Json(detail.into()))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
