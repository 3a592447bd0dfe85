//! Event service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{EventRepository, RecordRepository},
    error::{AppError, AppResult},
    models::{Event, EventChanges, EventStatus, EventWithCount, NewEvent},
    utils::validate_courses,
};

/// Event service for business logic
pub struct EventService;

impl EventService {
    /// Create an event
    pub async fn create(pool: &PgPool, mut event: NewEvent) -> AppResult<Event> {
        event.courses = validate_courses(&event.courses).map_err(AppError::Validation)?;

        let event = EventRepository::create(pool, &event).await?;
        tracing::info!(event_id = %event.id, name = %event.name, "Created event");

        Ok(event)
    }

    /// Get an event with its record count
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<EventWithCount> {
        EventRepository::find_with_count(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// List events, newest first
    pub async fn list(pool: &PgPool, status: Option<EventStatus>) -> AppResult<Vec<EventWithCount>> {
        EventRepository::list(pool, status.map(|s| s.as_str())).await
    }

    /// Apply a partial update
    ///
    /// Runs under the event row lock so a concurrent records replace cannot
    /// slip in a record for a course being removed.
    pub async fn update(pool: &PgPool, id: &Uuid, mut changes: EventChanges) -> AppResult<Event> {
        let mut tx = pool.begin().await?;

        EventRepository::lock_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if let Some(courses) = changes.courses.take() {
            let courses = validate_courses(&courses).map_err(AppError::Validation)?;
            let in_use = RecordRepository::courses_in_use(&mut tx, id).await?;
            let dropped = dropped_courses_in_use(&in_use, &courses);
            if !dropped.is_empty() {
                return Err(AppError::Validation(format!(
                    "Courses still used by records cannot be removed: {}",
                    dropped.join(", ")
                )));
            }
            changes.courses = Some(courses);
        }

        let event = EventRepository::update(&mut tx, id, &changes).await?;
        tx.commit().await?;

        tracing::info!(event_id = %id, "Updated event");
        Ok(event)
    }

    /// Delete an event together with its records and posters
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !EventRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        tracing::info!(event_id = %id, "Deleted event");
        Ok(())
    }
}

/// Courses used by stored records that the new list no longer offers
fn dropped_courses_in_use(in_use: &[String], courses: &[String]) -> Vec<String> {
    in_use
        .iter()
        .filter(|c| !courses.contains(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dropping_unused_course_is_allowed() {
        let in_use = labels(&["10Km"]);
        assert!(dropped_courses_in_use(&in_use, &labels(&["10Km", "하프"])).is_empty());
    }

    #[test]
    fn test_dropping_used_course_is_reported() {
        let in_use = labels(&["5Km", "10Km"]);
        assert_eq!(
            dropped_courses_in_use(&in_use, &labels(&["10Km"])),
            vec!["5Km".to_string()]
        );
    }
}
