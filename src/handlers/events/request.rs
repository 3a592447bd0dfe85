//! Event request DTOs

use serde::Deserialize;

/// Query parameters for listing events
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub status: Option<String>,
}

/// Query parameters for listing an event's records
#[derive(Debug, Default, Deserialize)]
pub struct ListRecordsQuery {
    pub bib: Option<String>,
    pub name: Option<String>,
    pub course: Option<String>,
}

/// Query parameters for record search
#[derive(Debug, Deserialize)]
pub struct SearchRecordsQuery {
    #[serde(default)]
    pub q: String,
}
