//! Poster repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewPoster, Poster, PosterChanges},
};

/// Repository for poster database operations
pub struct PosterRepository;

impl PosterRepository {
    /// Create a poster
    pub async fn create(pool: &PgPool, poster: &NewPoster) -> AppResult<Poster> {
        let poster = sqlx::query_as::<_, Poster>(
            r#"
            INSERT INTO posters (event_id, poster_type, image_url, link, sort_order)
            VALUES (
                $1, $2, $3, $4,
                COALESCE($5, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM posters WHERE poster_type = $2))
            )
            RETURNING *
            "#,
        )
        .bind(poster.event_id)
        .bind(&poster.poster_type)
        .bind(&poster.image_url)
        .bind(&poster.link)
        .bind(poster.order)
        .fetch_one(pool)
        .await?;

        Ok(poster)
    }

    /// Apply a partial update, `None` when the poster does not exist
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        changes: &PosterChanges,
    ) -> AppResult<Option<Poster>> {
        let poster = sqlx::query_as::<_, Poster>(
            r#"
            UPDATE posters
            SET
                event_id = COALESCE($2, event_id),
                poster_type = COALESCE($3, poster_type),
                image_url = COALESCE($4, image_url),
                link = CASE WHEN $5::text IS NULL THEN link ELSE NULLIF($5, '') END,
                sort_order = COALESCE($6, sort_order)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.event_id)
        .bind(&changes.poster_type)
        .bind(&changes.image_url)
        .bind(&changes.link)
        .bind(changes.order)
        .fetch_optional(pool)
        .await?;

        Ok(poster)
    }

    /// Delete a poster, returning whether it existed
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM posters WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Posters of one slider in display order
    pub async fn list_by_type(pool: &PgPool, poster_type: &str) -> AppResult<Vec<Poster>> {
        let posters = sqlx::query_as::<_, Poster>(
            r#"
            SELECT * FROM posters
            WHERE poster_type = $1
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(poster_type)
        .fetch_all(pool)
        .await?;

        Ok(posters)
    }

    /// Every poster, grouped by type
    pub async fn list_all(pool: &PgPool) -> AppResult<Vec<Poster>> {
        let posters = sqlx::query_as::<_, Poster>(
            r#"SELECT * FROM posters ORDER BY poster_type ASC, sort_order ASC, created_at ASC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(posters)
    }
}
