//! Admin response DTOs

use serde::Serialize;
use uuid::Uuid;

/// Outcome of a records replace or clear
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsWrittenResponse {
    pub event_id: Uuid,
    pub count: u64,
}
