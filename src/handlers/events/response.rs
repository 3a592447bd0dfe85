//! Event response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::{Event, EventWithCount, Record},
    results::Ranking,
    services::record_service::{PacePoint, RecordDetail, SearchOutcome},
};

/// Event list response
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventWithCount>,
}

/// Record list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListResponse {
    pub event_id: Uuid,
    pub total: usize,
    pub records: Vec<Record>,
}

/// Record search response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    /// Bib of the only match, when there is exactly one
    pub direct_hit: Option<String>,
    pub records: Vec<Record>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let direct_hit = outcome.direct_hit().map(str::to_string);
        Self {
            total: outcome.records.len(),
            query: outcome.query,
            direct_hit,
            records: outcome.records,
        }
    }
}

/// Single record page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetailResponse {
    pub event: Event,
    pub record: Record,
    pub ranking: Ranking,
    pub pace_profile: Vec<PacePoint>,
}

impl From<RecordDetail> for RecordDetailResponse {
    fn from(detail: RecordDetail) -> Self {
        Self {
            event: detail.event,
            record: detail.record,
            ranking: detail.ranking,
            pace_profile: detail.pace_profile,
        }
    }
}
