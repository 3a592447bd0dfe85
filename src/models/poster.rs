//! Poster model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Promotional poster shown in a landing-page slider
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    pub id: Uuid,
    /// Optional owning event; deleting the event deletes the poster
    pub event_id: Option<Uuid>,
    /// Slider the poster belongs to: `hero` or `next`
    #[serde(rename = "type")]
    pub poster_type: String,
    pub image_url: String,
    pub link: Option<String>,
    /// Sort key within its slider
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields of a new poster
#[derive(Debug, Clone)]
pub struct NewPoster {
    pub event_id: Option<Uuid>,
    pub poster_type: String,
    pub image_url: String,
    pub link: Option<String>,
    /// Appended after the last poster of its type when absent
    pub order: Option<i32>,
}

/// Partial poster update; an empty `link` clears it
#[derive(Debug, Clone, Default)]
pub struct PosterChanges {
    pub event_id: Option<Uuid>,
    pub poster_type: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub order: Option<i32>,
}
