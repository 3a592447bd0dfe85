//! Event model

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "event_date")]
    pub date: NaiveDate,
    /// Course labels in display order
    pub courses: Vec<String>,
    pub status: String,
    pub certificate_img: Option<String>,
    pub photo_cert_img: Option<String>,
    pub site_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event offers the given course label
    pub fn offers_course(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }
}

/// Event together with the number of stored records
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub record_count: i64,
}

/// Fields of a new event, already validated
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    pub courses: Vec<String>,
    pub status: EventStatus,
    pub certificate_img: Option<String>,
    pub photo_cert_img: Option<String>,
    pub site_url: Option<String>,
}

/// Partial event update
///
/// `None` keeps the stored value. For the optional image and URL fields an
/// empty string clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub courses: Option<Vec<String>>,
    pub status: Option<EventStatus>,
    pub certificate_img: Option<String>,
    pub photo_cert_img: Option<String>,
    pub site_url: Option<String>,
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Active,
    /// Finished events; these are surfaced on the landing page
    Past,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Past => "past",
        }
    }
}

/// Status label outside `upcoming`, `active` and `past`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event status '{0}'")]
pub struct UnknownEventStatus(pub String);

impl FromStr for EventStatus {
    type Err = UnknownEventStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "past" => Ok(Self::Past),
            _ => Err(UnknownEventStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("past".parse::<EventStatus>(), Ok(EventStatus::Past));
        assert_eq!("upcoming".parse::<EventStatus>(), Ok(EventStatus::Upcoming));
        assert_eq!(
            "finished".parse::<EventStatus>(),
            Err(UnknownEventStatus("finished".to_string()))
        );
        // Labels are stored lowercase
        assert!("Past".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_status_round_trips_through_its_label() {
        for status in [EventStatus::Upcoming, EventStatus::Active, EventStatus::Past] {
            assert_eq!(status.as_str().parse::<EventStatus>(), Ok(status));
        }
    }
}
