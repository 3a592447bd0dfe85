//! Admin handler implementations

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;
use validator::{Validate, ValidateUrl};

use crate::{
    constants::UPLOAD_FILE_FIELD,
    error::{AppError, AppResult},
    ingest,
    middleware::AuthenticatedAdmin,
    models::{Event, EventChanges, EventStatus, NewEvent, NewPoster, Poster, PosterChanges},
    services::{EventService, PosterService, RecordService},
    state::AppState,
    utils::sanitize_string,
};

use super::{
    request::{
        CreateEventRequest, CreatePosterRequest, ReplaceRecordsRequest, TemplateFormat,
        TemplateQuery, UpdateEventRequest, UpdatePosterRequest,
    },
    response::RecordsWrittenResponse,
};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Create an event
pub async fn create_event(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Json(payload): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    payload.validate()?;

    let status = payload
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?
        .unwrap_or(EventStatus::Upcoming);
    let event = NewEvent {
        name: sanitize_string(&payload.name),
        date: payload.date,
        courses: payload.courses,
        status,
        certificate_img: optional_text(payload.certificate_img),
        photo_cert_img: optional_text(payload.photo_cert_img),
        site_url: optional_text(payload.site_url),
    };

    let event = EventService::create(state.db(), event).await?;
    tracing::info!(admin = %admin.username, event_id = %event.id, "Event created by admin");

    Ok((StatusCode::CREATED, Json(event)))
}

/// Partially update an event
pub async fn update_event(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> AppResult<Json<Event>> {
    payload.validate()?;

    if let Some(url) = payload.site_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if !url.trim().validate_url() {
            return Err(AppError::Validation("siteUrl must be a valid URL".to_string()));
        }
    }

    let changes = EventChanges {
        name: payload.name.as_deref().map(sanitize_string),
        date: payload.date,
        courses: payload.courses,
        status: payload.status.as_deref().map(parse_status).transpose()?,
        certificate_img: payload.certificate_img.map(|s| s.trim().to_string()),
        photo_cert_img: payload.photo_cert_img.map(|s| s.trim().to_string()),
        site_url: payload.site_url.map(|s| s.trim().to_string()),
    };

    let event = EventService::update(state.db(), &id, changes).await?;
    tracing::info!(admin = %admin.username, event_id = %id, "Event updated by admin");

    Ok(Json(event))
}

/// Delete an event with its records and posters
pub async fn delete_event(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    EventService::delete(state.db(), &id).await?;
    tracing::info!(admin = %admin.username, event_id = %id, "Event deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}

/// Replace an event's records with a JSON payload
pub async fn replace_records(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceRecordsRequest>,
) -> AppResult<Json<RecordsWrittenResponse>> {
    let count = RecordService::replace(
        state.db(),
        &id,
        payload.records,
        state.config().upload.max_records,
    )
    .await?;
    tracing::info!(admin = %admin.username, event_id = %id, count, "Records replaced by admin");

    Ok(Json(RecordsWrittenResponse { event_id: id, count }))
}

/// Replace an event's records with an uploaded Excel or CSV sheet
pub async fn upload_records(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<RecordsWrittenResponse>> {
    let mut sheet = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FILE_FIELD) {
            sheet = Some(field.bytes().await?);
            break;
        }
    }
    let sheet = sheet.ok_or_else(|| {
        AppError::InvalidInput(format!("Multipart field '{UPLOAD_FILE_FIELD}' is required"))
    })?;

    let payloads = ingest::parse_sheet(&sheet)?;
    let count =
        RecordService::replace(state.db(), &id, payloads, state.config().upload.max_records)
            .await?;
    tracing::info!(
        admin = %admin.username,
        event_id = %id,
        count,
        bytes = sheet.len(),
        "Result sheet uploaded by admin"
    );

    Ok(Json(RecordsWrittenResponse { event_id: id, count }))
}

/// Remove every record of an event
pub async fn clear_records(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RecordsWrittenResponse>> {
    let count = RecordService::clear(state.db(), &id).await?;
    tracing::info!(admin = %admin.username, event_id = %id, count, "Records cleared by admin");

    Ok(Json(RecordsWrittenResponse { event_id: id, count }))
}

/// Download the sample result sheet
pub async fn download_template(
    _admin: AuthenticatedAdmin,
    Query(query): Query<TemplateQuery>,
) -> AppResult<impl IntoResponse> {
    let (body, content_type, file_name) = match query.format {
        TemplateFormat::Xlsx => (
            ingest::template_xlsx().map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Template generation failed: {e}"))
            })?,
            XLSX_CONTENT_TYPE,
            ingest::TEMPLATE_FILE_NAME,
        ),
        TemplateFormat::Csv => (
            ingest::template_csv().map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Template generation failed: {e}"))
            })?,
            "text/csv; charset=utf-8",
            ingest::TEMPLATE_CSV_FILE_NAME,
        ),
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}

/// Create a poster
pub async fn create_poster(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Json(payload): Json<CreatePosterRequest>,
) -> AppResult<(StatusCode, Json<Poster>)> {
    payload.validate()?;

    let poster = PosterService::create(
        state.db(),
        NewPoster {
            event_id: payload.event_id,
            poster_type: payload.poster_type.trim().to_string(),
            image_url: payload.image_url.trim().to_string(),
            link: optional_text(payload.link),
            order: payload.order,
        },
    )
    .await?;
    tracing::info!(admin = %admin.username, poster_id = %poster.id, "Poster created by admin");

    Ok((StatusCode::CREATED, Json(poster)))
}

/// Partially update a poster
pub async fn update_poster(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePosterRequest>,
) -> AppResult<Json<Poster>> {
    payload.validate()?;

    if let Some(link) = payload.link.as_deref().filter(|l| !l.trim().is_empty()) {
        if !link.trim().validate_url() {
            return Err(AppError::Validation("link must be a valid URL".to_string()));
        }
    }

    let changes = PosterChanges {
        event_id: payload.event_id,
        poster_type: payload.poster_type.map(|t| t.trim().to_string()),
        image_url: payload.image_url.map(|u| u.trim().to_string()),
        link: payload.link.map(|l| l.trim().to_string()),
        order: payload.order,
    };

    let poster = PosterService::update(state.db(), &id, changes).await?;
    tracing::info!(admin = %admin.username, poster_id = %id, "Poster updated by admin");

    Ok(Json(poster))
}

/// Delete a poster
pub async fn delete_poster(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    PosterService::delete(state.db(), &id).await?;
    tracing::info!(admin = %admin.username, poster_id = %id, "Poster deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_status(status: &str) -> AppResult<EventStatus> {
    status.trim().parse::<EventStatus>().map_err(|_| {
        AppError::Validation("Invalid event status. Use 'upcoming', 'active' or 'past'".to_string())
    })
}

/// Trimmed text, `None` when blank
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
