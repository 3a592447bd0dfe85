//! Admin request DTOs

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_COURSES_PER_EVENT, MAX_EVENT_NAME_LENGTH},
    models::RecordPayload,
};

/// Create event request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = MAX_EVENT_NAME_LENGTH))]
    pub name: String,

    pub date: NaiveDate,

    #[validate(length(min = 1, max = MAX_COURSES_PER_EVENT))]
    pub courses: Vec<String>,

    pub status: Option<String>,

    #[validate(length(max = 2048))]
    pub certificate_img: Option<String>,

    #[validate(length(max = 2048))]
    pub photo_cert_img: Option<String>,

    #[validate(url)]
    pub site_url: Option<String>,
}

/// Update event request
///
/// Absent fields are kept. For `certificateImg`, `photoCertImg` and
/// `siteUrl` an empty string clears the stored value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = MAX_EVENT_NAME_LENGTH))]
    pub name: Option<String>,

    pub date: Option<NaiveDate>,

    #[validate(length(min = 1, max = MAX_COURSES_PER_EVENT))]
    pub courses: Option<Vec<String>>,

    pub status: Option<String>,

    #[validate(length(max = 2048))]
    pub certificate_img: Option<String>,

    #[validate(length(max = 2048))]
    pub photo_cert_img: Option<String>,

    pub site_url: Option<String>,
}

/// Replace-all records request
#[derive(Debug, Deserialize)]
pub struct ReplaceRecordsRequest {
    pub records: Vec<RecordPayload>,
}

/// Create poster request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePosterRequest {
    pub event_id: Option<Uuid>,

    #[serde(rename = "type")]
    pub poster_type: String,

    #[validate(length(min = 1, max = 2048))]
    pub image_url: String,

    #[validate(url)]
    pub link: Option<String>,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// Update poster request; absent fields are kept
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePosterRequest {
    pub event_id: Option<Uuid>,

    #[serde(rename = "type")]
    pub poster_type: Option<String>,

    #[validate(length(min = 1, max = 2048))]
    pub image_url: Option<String>,

    /// Empty string removes the link
    pub link: Option<String>,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// Sample sheet format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    #[default]
    Xlsx,
    Csv,
}

/// Query parameters for the sample sheet download
#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    pub format: TemplateFormat,
}
