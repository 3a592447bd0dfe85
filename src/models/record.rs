//! Record model
//!
//! A record is one runner's result within one event, identified by
//! `(event_id, bib)`. Splits travel through the store as a versioned JSON
//! document; see [`crate::results::splits`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use crate::results::splits::{self, SplitsCodecError};

/// A timed checkpoint along the course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Split {
    /// Checkpoint label, usually a distance marker such as `5.0km`
    pub point: String,
    /// Elapsed time at this checkpoint (`HH:MM:SS`)
    pub time: String,
    /// Wall-clock time of passing (`HH:MM:SS`)
    pub pass_time: String,
    /// Pace over the segment ending here (`MM:SS`)
    pub pace: String,
}

/// Raw `records` row
#[derive(Debug, Clone, FromRow)]
pub struct RecordRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub bib: String,
    pub name: String,
    pub course: String,
    pub gender: String,
    pub finish_time: String,
    pub finish_seconds: i32,
    pub speed: f64,
    pub pace: String,
    pub splits: Json<serde_json::Value>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Record domain model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Uuid,
    pub event_id: Uuid,
    pub bib: String,
    pub name: String,
    pub course: String,
    /// Opaque category label (`M`/`F` today)
    pub gender: String,
    /// Elapsed finish time (`HH:MM:SS`)
    pub finish_time: String,
    /// Average speed in km/h
    pub speed: f64,
    /// Average pace (`MM:SS` per km)
    pub pace: String,
    pub splits: Vec<Split>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for Record {
    type Error = SplitsCodecError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let splits = splits::decode(row.splits.0)?;

        Ok(Self {
            id: row.id,
            event_id: row.event_id,
            bib: row.bib,
            name: row.name,
            course: row.course,
            gender: row.gender,
            finish_time: row.finish_time,
            speed: row.speed,
            pace: row.pace,
            splits,
            created_at: row.created_at,
        })
    }
}

/// A validated record ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub bib: String,
    pub name: String,
    pub course: String,
    pub gender: String,
    pub finish_time: String,
    pub finish_seconds: u32,
    pub speed: f64,
    pub pace: String,
    pub splits: Vec<Split>,
}

/// One uploaded record before validation
///
/// Every field defaults so a missing value is reported as a row issue
/// instead of rejecting the whole body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPayload {
    pub bib: String,
    pub name: String,
    pub course: String,
    pub gender: String,
    #[serde(alias = "finish_time")]
    pub finish_time: String,
    /// Ignored on ingest; speed is always recomputed
    pub speed: Option<f64>,
    /// Ignored on ingest; pace is always recomputed
    pub pace: Option<String>,
    pub splits: Vec<Split>,
    /// Line in the uploaded sheet, used when reporting row issues
    #[serde(skip)]
    pub source_row: Option<usize>,
}
