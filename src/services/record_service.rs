//! Record service
//!
//! Uploads replace an event's whole record set. A payload is validated in
//! full before anything is written; the delete and the inserts then run in
//! one transaction holding the event row lock, so readers see either the
//! old set or the new one and concurrent replaces of the same event
//! serialize.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{
        MAX_BIB_LENGTH, MAX_GENDER_LENGTH, MAX_REPORTED_UPLOAD_ISSUES, MAX_RUNNER_NAME_LENGTH,
    },
    db::repositories::{EventRepository, RecordFilter, RecordRepository},
    error::{AppError, AppResult},
    models::{Event, NewRecord, Record, RecordPayload, Split},
    results::{
        Ranking,
        metrics::{self, split_distance_km},
        ranking, search,
    },
    utils::{
        format_hms, pace_to_minutes, parse_hms, parse_pace, sanitize_string,
        time::SECONDS_PER_DAY,
    },
};

/// Search results for one query
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: String,
    pub records: Vec<Record>,
}

impl SearchOutcome {
    /// The bib to jump to when exactly one record matched
    pub fn direct_hit(&self) -> Option<&str> {
        match self.records.as_slice() {
            [only] => Some(only.bib.as_str()),
            _ => None,
        }
    }
}

/// One point of a runner's pace chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PacePoint {
    pub point: String,
    pub pace_minutes: f64,
}

/// A record with everything its detail page shows
#[derive(Debug, Clone)]
pub struct RecordDetail {
    pub event: Event,
    pub record: Record,
    pub ranking: Ranking,
    pub pace_profile: Vec<PacePoint>,
}

/// Record service for business logic
pub struct RecordService;

impl RecordService {
    /// Replace every record of an event with the uploaded set
    ///
    /// Returns the number of stored records.
    pub async fn replace(
        pool: &PgPool,
        event_id: &Uuid,
        payloads: Vec<RecordPayload>,
        max_records: usize,
    ) -> AppResult<u64> {
        let mut tx = pool.begin().await?;

        let event = EventRepository::lock_for_update(&mut tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let records = validate_upload(&event, payloads, max_records)?;

        let removed = RecordRepository::delete_for_event(&mut tx, event_id).await?;
        let inserted = RecordRepository::insert_many(&mut tx, event_id, &records).await?;
        tx.commit().await?;

        tracing::info!(event_id = %event_id, removed, inserted, "Replaced event records");
        Ok(inserted)
    }

    /// Remove every record of an event, returning how many were deleted
    pub async fn clear(pool: &PgPool, event_id: &Uuid) -> AppResult<u64> {
        let mut tx = pool.begin().await?;

        EventRepository::lock_for_update(&mut tx, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let removed = RecordRepository::delete_for_event(&mut tx, event_id).await?;
        tx.commit().await?;

        tracing::info!(event_id = %event_id, removed, "Cleared event records");
        Ok(removed)
    }

    /// Records of an event matching the given filters
    pub async fn list(
        pool: &PgPool,
        event_id: &Uuid,
        filter: &RecordFilter<'_>,
    ) -> AppResult<Vec<Record>> {
        let (event, records) = futures::try_join!(
            EventRepository::find_by_id(pool, event_id),
            RecordRepository::list_filtered(pool, event_id, filter),
        )?;

        if event.is_none() {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        Ok(records)
    }

    /// Search an event's records by bib or name
    pub async fn search(pool: &PgPool, event_id: &Uuid, query: &str) -> AppResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation(
                "Enter a bib number or a name to search".to_string(),
            ));
        }

        let records = Self::list(pool, event_id, &RecordFilter::default()).await?;
        let found = search::search(&records, query).into_iter().cloned().collect();

        Ok(SearchOutcome {
            query: query.to_string(),
            records: found,
        })
    }

    /// One record with its ranking and pace profile
    ///
    /// The target and every record it is ranked against come from a single
    /// read of the event's records.
    pub async fn detail(pool: &PgPool, event_id: &Uuid, bib: &str) -> AppResult<RecordDetail> {
        let (event, records) = futures::try_join!(
            EventRepository::find_by_id(pool, event_id),
            RecordRepository::list_for_event(pool, event_id),
        )?;

        let event = event.ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        let record = records
            .iter()
            .find(|r| r.bib == bib)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

        let ranking = ranking::compute(&records, &record);
        let pace_profile = pace_profile(&record.splits);

        Ok(RecordDetail {
            event,
            record,
            ranking,
            pace_profile,
        })
    }
}

/// Pace over distance for charting; splits with an unreadable pace are left out
pub fn pace_profile(splits: &[Split]) -> Vec<PacePoint> {
    splits
        .iter()
        .filter_map(|s| {
            pace_to_minutes(&s.pace).ok().map(|pace_minutes| PacePoint {
                point: s.point.clone(),
                pace_minutes,
            })
        })
        .collect()
}

/// Row issues collected while validating an upload
#[derive(Debug, Default)]
struct UploadIssues {
    reported: Vec<String>,
    total: usize,
}

impl UploadIssues {
    fn push(&mut self, row: usize, message: impl std::fmt::Display) {
        self.total += 1;
        if self.reported.len() < MAX_REPORTED_UPLOAD_ISSUES {
            self.reported.push(format!("row {row}: {message}"));
        }
    }

    fn into_result<T>(mut self, value: T) -> AppResult<T> {
        if self.total == 0 {
            return Ok(value);
        }
        let hidden = self.total - self.reported.len();
        if hidden > 0 {
            self.reported.push(format!("{hidden} more issue(s) not shown"));
        }
        Err(AppError::InvalidUpload(self.reported))
    }
}

/// Validate an upload against its event and derive speed and pace
///
/// Every row is checked and all issues are reported together. Rows are
/// numbered by their sheet line when they came from a sheet, otherwise by
/// their 1-based position in the payload.
pub fn validate_upload(
    event: &Event,
    payloads: Vec<RecordPayload>,
    max_records: usize,
) -> AppResult<Vec<NewRecord>> {
    if payloads.is_empty() {
        return Err(AppError::Validation("No records to upload".to_string()));
    }
    if payloads.len() > max_records {
        return Err(AppError::Validation(format!(
            "Upload holds {} records; the limit is {}",
            payloads.len(),
            max_records
        )));
    }

    let mut issues = UploadIssues::default();
    let mut seen_bibs: HashMap<String, usize> = HashMap::with_capacity(payloads.len());
    let mut records = Vec::with_capacity(payloads.len());

    for (idx, payload) in payloads.into_iter().enumerate() {
        let row = payload.source_row.unwrap_or(idx + 1);
        let bib = sanitize_string(&payload.bib);
        let name = sanitize_string(&payload.name);
        let gender = sanitize_string(&payload.gender);
        let course = sanitize_string(&payload.course);

        if bib.is_empty() {
            issues.push(row, "bib is required");
        } else if let Some(first) = seen_bibs.get(&bib) {
            issues.push(row, format!("bib '{bib}' duplicates row {first}"));
        } else {
            seen_bibs.insert(bib.clone(), row);
        }
        if name.is_empty() {
            issues.push(row, "name is required");
        }
        if gender.is_empty() {
            issues.push(row, "gender is required");
        }
        for (field, value, max) in [
            ("bib", &bib, MAX_BIB_LENGTH),
            ("name", &name, MAX_RUNNER_NAME_LENGTH),
            ("gender", &gender, MAX_GENDER_LENGTH),
        ] {
            if value.chars().count() > max {
                issues.push(row, format!("{field} is longer than {max} characters"));
            }
        }

        let course_ok = if course.is_empty() {
            issues.push(row, "course is required");
            false
        } else if !event.offers_course(&course) {
            issues.push(row, format!("course '{course}' is not offered by this event"));
            false
        } else if metrics::course_distance_km(&course).is_none() {
            issues.push(row, format!("course '{course}' has no known distance"));
            false
        } else {
            true
        };

        let finish_seconds = match parse_hms(&payload.finish_time) {
            Ok(0) => {
                issues.push(row, "finishTime must be greater than zero");
                None
            }
            Ok(secs) => Some(secs),
            Err(_) if payload.finish_time.trim().is_empty() => {
                issues.push(row, "finishTime is required");
                None
            }
            Err(_) => {
                issues.push(
                    row,
                    format!("finishTime '{}' is not HH:MM:SS", payload.finish_time.trim()),
                );
                None
            }
        };

        for message in split_issues(&payload.splits, finish_seconds) {
            issues.push(row, message);
        }

        let (Some(finish_seconds), true) = (finish_seconds, course_ok) else {
            continue;
        };
        match metrics::derive(&course, finish_seconds) {
            Ok(derived) => records.push(NewRecord {
                bib,
                name,
                course,
                gender,
                finish_time: format_hms(finish_seconds),
                finish_seconds,
                speed: derived.speed_kmh,
                pace: derived.pace,
                splits: normalize_splits(payload.splits),
            }),
            Err(e) => issues.push(row, e),
        }
    }

    issues.into_result(records)
}

/// Problems with one record's splits
fn split_issues(splits: &[Split], finish_seconds: Option<u32>) -> Vec<String> {
    let mut found = Vec::new();
    let mut previous_time: Option<u32> = None;
    let mut previous_distance: Option<f64> = None;
    let mut last_time: Option<u32> = None;

    for (idx, split) in splits.iter().enumerate() {
        let label = format!("split {}", idx + 1);

        if split.point.trim().is_empty() {
            found.push(format!("{label}: point is required"));
        }

        let time = parse_hms(&split.time).ok();
        match time {
            None => found.push(format!("{label}: time '{}' is not HH:MM:SS", split.time.trim())),
            Some(t) => {
                if previous_time.is_some_and(|prev| t < prev) {
                    found.push(format!("{label}: time goes backwards"));
                }
                previous_time = Some(t);
            }
        }
        last_time = time;

        match parse_hms(&split.pass_time) {
            Ok(t) if t < SECONDS_PER_DAY => {}
            _ => found.push(format!(
                "{label}: passTime '{}' is not a time of day",
                split.pass_time.trim()
            )),
        }

        if parse_pace(&split.pace).is_err() {
            found.push(format!("{label}: pace '{}' is not MM:SS", split.pace.trim()));
        }

        if let Some(distance) = split_distance_km(&split.point) {
            if previous_distance.is_some_and(|prev| distance <= prev) {
                found.push(format!("{label}: distance must increase"));
            }
            previous_distance = Some(distance);
        }
    }

    if let (Some(last), Some(finish)) = (last_time, finish_seconds) {
        if last != finish {
            found.push("last split time does not match finishTime".to_string());
        }
    }

    found
}

fn normalize_splits(splits: Vec<Split>) -> Vec<Split> {
    splits
        .into_iter()
        .map(|s| Split {
            point: sanitize_string(&s.point),
            time: s.time.trim().to_string(),
            pass_time: s.pass_time.trim().to_string(),
            pace: s.pace.trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::results::fixtures::record;

    fn event(courses: &[&str]) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "Spring Marathon".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(),
            courses: courses.iter().map(|c| c.to_string()).collect(),
            status: "past".to_string(),
            certificate_img: None,
            photo_cert_img: None,
            site_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn payload(bib: &str, course: &str, finish_time: &str) -> RecordPayload {
        RecordPayload {
            bib: bib.to_string(),
            name: format!("Runner {bib}"),
            course: course.to_string(),
            gender: "M".to_string(),
            finish_time: finish_time.to_string(),
            ..Default::default()
        }
    }

    fn split(point: &str, time: &str, pass_time: &str, pace: &str) -> Split {
        Split {
            point: point.to_string(),
            time: time.to_string(),
            pass_time: pass_time.to_string(),
            pace: pace.to_string(),
        }
    }

    fn issues(err: AppError) -> Vec<String> {
        match err {
            AppError::InvalidUpload(issues) => issues,
            other => panic!("expected InvalidUpload, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_upload_derives_metrics() {
        let mut supplied = payload("1", "5Km", "0:25:00");
        supplied.speed = Some(99.0);
        supplied.pace = Some("01:00".to_string());

        let records = validate_upload(&event(&["5Km"]), vec![supplied], 100).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].finish_time, "00:25:00");
        assert_eq!(records[0].finish_seconds, 1500);
        assert_eq!(records[0].speed, 12.0);
        assert_eq!(records[0].pace, "05:00");
    }

    #[test]
    fn test_empty_and_oversized_uploads_are_rejected() {
        let ev = event(&["5Km"]);
        assert!(matches!(
            validate_upload(&ev, Vec::new(), 10),
            Err(AppError::Validation(_))
        ));

        let many = (0..3).map(|i| payload(&i.to_string(), "5Km", "00:30:00")).collect();
        assert!(matches!(
            validate_upload(&ev, many, 2),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_all_row_issues_are_reported() {
        let mut nameless = payload("2", "5Km", "00:30:00");
        nameless.name = "  ".to_string();

        let err = validate_upload(
            &event(&["5Km"]),
            vec![
                payload("1", "5Km", "00:30:00"),
                nameless,
                payload("1", "10Km", "00:61:00"),
                payload("", "5Km", "00:00:00"),
            ],
            100,
        )
        .unwrap_err();

        let issues = issues(err);
        assert!(issues.contains(&"row 2: name is required".to_string()));
        assert!(issues.contains(&"row 3: bib '1' duplicates row 1".to_string()));
        assert!(issues.contains(&"row 3: course '10Km' is not offered by this event".to_string()));
        assert!(issues.contains(&"row 3: finishTime '00:61:00' is not HH:MM:SS".to_string()));
        assert!(issues.contains(&"row 4: bib is required".to_string()));
        assert!(issues.contains(&"row 4: finishTime must be greater than zero".to_string()));
    }

    #[test]
    fn test_overlong_fields_are_row_issues() {
        let mut row = payload(&"9".repeat(MAX_BIB_LENGTH + 1), "5Km", "00:30:00");
        row.name = "가".repeat(MAX_RUNNER_NAME_LENGTH + 1);
        row.gender = "X".repeat(MAX_GENDER_LENGTH + 1);

        let issues = issues(validate_upload(&event(&["5Km"]), vec![row], 10).unwrap_err());

        assert_eq!(
            issues,
            vec![
                "row 1: bib is longer than 32 characters".to_string(),
                "row 1: name is longer than 100 characters".to_string(),
                "row 1: gender is longer than 16 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_fields_at_the_limit_are_accepted() {
        let mut row = payload(&"9".repeat(MAX_BIB_LENGTH), "5Km", "00:30:00");
        row.name = "가".repeat(MAX_RUNNER_NAME_LENGTH);

        assert!(validate_upload(&event(&["5Km"]), vec![row], 10).is_ok());
    }

    #[test]
    fn test_sheet_rows_are_reported_by_sheet_line() {
        let sheet = "bib,name,course,gender,finishTime\n\
                     ,,,,\n\
                     1,Kim,5Km,F,00:30:00\n\
                     2,,5Km,M,00:29:00\n\
                     1,Lee,5Km,M,00:31:00\n";
        let payloads = crate::ingest::parse_csv(sheet.as_bytes()).unwrap();

        let issues = issues(validate_upload(&event(&["5Km"]), payloads, 10).unwrap_err());

        assert_eq!(
            issues,
            vec![
                "row 4: name is required".to_string(),
                "row 5: bib '1' duplicates row 3".to_string(),
            ]
        );
    }

    #[test]
    fn test_reported_issues_are_capped() {
        let rows = (0..80).map(|i| payload(&i.to_string(), "Ultra", "00:30:00")).collect();

        let issues = issues(validate_upload(&event(&["5Km"]), rows, 100).unwrap_err());

        assert_eq!(issues.len(), MAX_REPORTED_UPLOAD_ISSUES + 1);
        assert_eq!(issues.last().unwrap(), "30 more issue(s) not shown");
    }

    #[test]
    fn test_valid_splits_are_kept() {
        let mut row = payload("7", "10Km", "00:46:45");
        row.splits = vec![
            split("5.0km", "00:23:10", "09:23:10", "04:38"),
            split("10.0km", "00:46:45", "09:46:45", "04:43"),
        ];

        let records = validate_upload(&event(&["10Km"]), vec![row], 10).unwrap();
        assert_eq!(records[0].splits.len(), 2);
        assert_eq!(records[0].splits[1].point, "10.0km");
    }

    #[test]
    fn test_split_rules() {
        let mut row = payload("7", "10Km", "00:46:45");
        row.splits = vec![
            split("5.0km", "00:23:10", "25:00:00", "04:38"),
            split("2.5km", "00:20:00", "09:20:00", "4m38"),
            split("", "00:45:00", "09:45:00", "04:40"),
        ];

        let issues = issues(validate_upload(&event(&["10Km"]), vec![row], 10).unwrap_err());

        assert!(issues.contains(&"row 1: split 1: passTime '25:00:00' is not a time of day".to_string()));
        assert!(issues.contains(&"row 1: split 2: time goes backwards".to_string()));
        assert!(issues.contains(&"row 1: split 2: pace '4m38' is not MM:SS".to_string()));
        assert!(issues.contains(&"row 1: split 2: distance must increase".to_string()));
        assert!(issues.contains(&"row 1: split 3: point is required".to_string()));
        assert!(issues.contains(&"row 1: last split time does not match finishTime".to_string()));
    }

    #[test]
    fn test_direct_hit_only_for_single_match() {
        let one = SearchOutcome {
            query: "12858".to_string(),
            records: vec![record("12858", "박민준", "10Km", "M", "00:32:53")],
        };
        assert_eq!(one.direct_hit(), Some("12858"));

        let none = SearchOutcome {
            query: "x".to_string(),
            records: Vec::new(),
        };
        assert_eq!(none.direct_hit(), None);
    }

    #[test]
    fn test_pace_profile_converts_to_minutes() {
        let splits = vec![
            split("5km", "00:22:30", "08:22:30", "04:30"),
            split("10km", "00:46:00", "08:46:00", "04:42"),
        ];

        let profile = pace_profile(&splits);
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].point, "5km");
        assert!((profile[0].pace_minutes - 4.5).abs() < 1e-9);
        assert!((profile[1].pace_minutes - 4.7).abs() < 1e-9);
    }
}
