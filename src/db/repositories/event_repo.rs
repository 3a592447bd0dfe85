//! Event repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Event, EventChanges, EventWithCount, NewEvent},
};

const SELECT_WITH_COUNT: &str = r#"
    SELECT e.*, COUNT(r.id) AS record_count
    FROM events e
    LEFT JOIN records r ON r.event_id = e.id
"#;

/// Repository for event database operations
pub struct EventRepository;

impl EventRepository {
    /// Create a new event
    pub async fn create(pool: &PgPool, event: &NewEvent) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                name, event_date, courses, status,
                certificate_img, photo_cert_img, site_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&event.name)
        .bind(event.date)
        .bind(&event.courses)
        .bind(event.status.as_str())
        .bind(&event.certificate_img)
        .bind(&event.photo_cert_img)
        .bind(&event.site_url)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(event)
    }

    /// Find event by ID together with its record count
    pub async fn find_with_count(pool: &PgPool, id: &Uuid) -> AppResult<Option<EventWithCount>> {
        let sql = format!("{SELECT_WITH_COUNT} WHERE e.id = $1 GROUP BY e.id");
        let event = sqlx::query_as::<_, EventWithCount>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(event)
    }

    /// List events, newest date first, optionally restricted to one status
    pub async fn list(pool: &PgPool, status: Option<&str>) -> AppResult<Vec<EventWithCount>> {
        let sql = format!(
            "{SELECT_WITH_COUNT}
            WHERE ($1::text IS NULL OR e.status = $1)
            GROUP BY e.id
            ORDER BY e.event_date DESC, e.created_at DESC"
        );
        let events = sqlx::query_as::<_, EventWithCount>(&sql)
            .bind(status)
            .fetch_all(pool)
            .await?;

        Ok(events)
    }

    /// Lock an event row for the rest of the transaction
    ///
    /// Writers of the same event's records serialize on this lock.
    pub async fn lock_for_update(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1 FOR UPDATE"#)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(event)
    }

    /// Apply a partial update
    pub async fn update(
        conn: &mut PgConnection,
        id: &Uuid,
        changes: &EventChanges,
    ) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET
                name = COALESCE($2, name),
                event_date = COALESCE($3, event_date),
                courses = COALESCE($4, courses),
                status = COALESCE($5, status),
                certificate_img = CASE WHEN $6::text IS NULL THEN certificate_img ELSE NULLIF($6, '') END,
                photo_cert_img = CASE WHEN $7::text IS NULL THEN photo_cert_img ELSE NULLIF($7, '') END,
                site_url = CASE WHEN $8::text IS NULL THEN site_url ELSE NULLIF($8, '') END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.date)
        .bind(&changes.courses)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(&changes.certificate_img)
        .bind(&changes.photo_cert_img)
        .bind(&changes.site_url)
        .fetch_one(conn)
        .await?;

        Ok(event)
    }

    /// Delete an event; records and posters go with it
    ///
    /// Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM events WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
