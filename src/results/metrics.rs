//! Derived speed and pace
//!
//! Both values are functions of the finish time and the course distance.
//! Course distances come from a fixed label table; an unknown label is an
//! error, never a silent default.

use std::sync::LazyLock;

use regex::Regex;

use crate::{constants::COURSE_DISTANCES_KM, utils::time::format_pace};

static SPLIT_DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(?:km|k)$").expect("valid regex")
});

/// Speed and pace derived for one finish
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// km/h rounded to two decimals
    pub speed_kmh: f64,
    /// `MM:SS` per km
    pub pace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsError {
    #[error("unknown course '{0}'")]
    UnknownCourse(String),

    #[error("finish time must be greater than zero")]
    ZeroFinishTime,
}

/// Look up a course label's distance in kilometers
pub fn course_distance_km(label: &str) -> Option<f64> {
    let label = label.trim();
    COURSE_DISTANCES_KM
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(label))
        .map(|(_, km)| *km)
}

/// Derive speed and pace for a finish on the given course
pub fn derive(course: &str, finish_seconds: u32) -> Result<DerivedMetrics, MetricsError> {
    let distance =
        course_distance_km(course).ok_or_else(|| MetricsError::UnknownCourse(course.to_string()))?;
    if finish_seconds == 0 {
        return Err(MetricsError::ZeroFinishTime);
    }

    let seconds = f64::from(finish_seconds);
    let speed_kmh = round2(distance / (seconds / 3600.0));
    let pace_seconds = (seconds / distance).round() as u32;

    Ok(DerivedMetrics {
        speed_kmh,
        pace: format_pace(pace_seconds),
    })
}

/// Distance encoded in a split label such as `5.0km` or `10K`
pub fn split_distance_km(point: &str) -> Option<f64> {
    let caps = SPLIT_DISTANCE_RE.captures(point.trim())?;
    caps[1].parse().ok()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
