//! Poster service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{EventRepository, PosterRepository},
    error::{AppError, AppResult},
    models::{NewPoster, Poster, PosterChanges},
    utils::validate_poster_type,
};

/// Poster service for business logic
pub struct PosterService;

impl PosterService {
    /// Create a poster
    pub async fn create(pool: &PgPool, poster: NewPoster) -> AppResult<Poster> {
        validate_poster_type(&poster.poster_type)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(event_id) = &poster.event_id {
            Self::ensure_event(pool, event_id).await?;
        }

        let poster = PosterRepository::create(pool, &poster).await?;
        tracing::info!(poster_id = %poster.id, poster_type = %poster.poster_type, "Created poster");

        Ok(poster)
    }

    /// Apply a partial update
    pub async fn update(pool: &PgPool, id: &Uuid, changes: PosterChanges) -> AppResult<Poster> {
        if let Some(poster_type) = &changes.poster_type {
            validate_poster_type(poster_type).map_err(|e| AppError::Validation(e.to_string()))?;
        }
        if let Some(event_id) = &changes.event_id {
            Self::ensure_event(pool, event_id).await?;
        }

        PosterRepository::update(pool, id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Poster not found".to_string()))
    }

    /// Delete a poster
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !PosterRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Poster not found".to_string()));
        }

        tracing::info!(poster_id = %id, "Deleted poster");
        Ok(())
    }

    /// Posters of one type, or all posters grouped by type
    pub async fn list(pool: &PgPool, poster_type: Option<&str>) -> AppResult<Vec<Poster>> {
        match poster_type {
            Some(t) => {
                validate_poster_type(t).map_err(|e| AppError::Validation(e.to_string()))?;
                PosterRepository::list_by_type(pool, t).await
            }
            None => PosterRepository::list_all(pool).await,
        }
    }

    async fn ensure_event(pool: &PgPool, event_id: &Uuid) -> AppResult<()> {
        if EventRepository::find_by_id(pool, event_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Event {} does not exist",
                event_id
            )));
        }
        Ok(())
    }
}
