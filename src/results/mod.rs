//! Results core
//!
//! Pure computations over an event's records: ranking, search, derived
//! speed/pace and the split storage codec. Nothing here performs I/O, so
//! every function is safe to call concurrently for different targets.

pub mod metrics;
pub mod ranking;
pub mod search;
pub mod splits;

pub use ranking::{PodiumEntry, Ranking};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::Record;

    /// Minimal record for ranking and search tests
    pub fn record(bib: &str, name: &str, course: &str, gender: &str, finish_time: &str) -> Record {
        Record {
            id: Uuid::new_v4(),
            event_id: Uuid::nil(),
            bib: bib.to_string(),
            name: name.to_string(),
            course: course.to_string(),
            gender: gender.to_string(),
            finish_time: finish_time.to_string(),
            speed: 0.0,
            pace: "00:00".to_string(),
            splits: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
