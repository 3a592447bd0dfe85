//! Ranking calculator
//!
//! Ranks one runner inside their course and inside their course + gender
//! group. Pure and deterministic: sorting is stable, so exact time ties keep
//! the order of the input list.

use serde::Serialize;

use crate::{models::Record, utils::time::parse_hms};

/// Rank reported when the target is missing from its own group
pub const NOT_RANKED: usize = 0;

/// Podium size
pub const PODIUM_SIZE: usize = 3;

/// One podium place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodiumEntry {
    pub rank: usize,
    pub bib: String,
    pub name: String,
    pub finish_time: String,
}

/// Ranking of a single record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    /// 1-based position within the course, `NOT_RANKED` if absent
    pub overall_rank: usize,
    /// 1-based position within course + gender, `NOT_RANKED` if absent
    pub gender_rank: usize,
    pub total_course: usize,
    pub total_gender: usize,
    pub my_record: String,
    pub gender_label: String,
    pub top3: Vec<PodiumEntry>,
}

/// Elapsed finish seconds used for ordering
///
/// Stored times are validated on upload; anything unparsable sorts last.
pub fn elapsed_seconds(record: &Record) -> u32 {
    parse_hms(&record.finish_time).unwrap_or(u32::MAX)
}

/// Stable sort, fastest first
pub fn sort_by_finish(records: &mut [&Record]) {
    records.sort_by_cached_key(|r| elapsed_seconds(r));
}

/// Display label for a gender category
pub fn gender_label(gender: &str) -> String {
    match gender {
        "M" => "Man".to_string(),
        "F" => "Woman".to_string(),
        other => other.to_string(),
    }
}

/// 1-based position of the first record with this bib
fn position_of(list: &[&Record], bib: &str) -> usize {
    list.iter()
        .position(|r| r.bib == bib)
        .map_or(NOT_RANKED, |i| i + 1)
}

/// Compute the ranking of `target` among all `records` of its event
pub fn compute(records: &[Record], target: &Record) -> Ranking {
    let mut course_records: Vec<&Record> = records
        .iter()
        .filter(|r| r.course == target.course)
        .collect();
    sort_by_finish(&mut course_records);

    let gender_records: Vec<&Record> = course_records
        .iter()
        .copied()
        .filter(|r| r.gender == target.gender)
        .collect();

    let top3 = gender_records
        .iter()
        .take(PODIUM_SIZE)
        .enumerate()
        .map(|(i, r)| PodiumEntry {
            rank: i + 1,
            bib: r.bib.clone(),
            name: r.name.clone(),
            finish_time: r.finish_time.clone(),
        })
        .collect();

    Ranking {
        overall_rank: position_of(&course_records, &target.bib),
        gender_rank: position_of(&gender_records, &target.bib),
        total_course: course_records.len(),
        total_gender: gender_records.len(),
        my_record: target.finish_time.clone(),
        gender_label: gender_label(&target.gender),
        top3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::fixtures::record;

    #[test]
    fn test_two_runner_scenario() {
        let records = vec![
            record("A", "Runner A", "10Km", "M", "00:30:00"),
            record("B", "Runner B", "10Km", "M", "00:28:00"),
        ];

        let ranking = compute(&records, &records[0]);

        assert_eq!(ranking.overall_rank, 2);
        assert_eq!(ranking.gender_rank, 2);
        assert_eq!(ranking.total_course, 2);
        assert_eq!(ranking.total_gender, 2);
        assert_eq!(ranking.my_record, "00:30:00");
        assert_eq!(ranking.top3.len(), 2);
        assert_eq!(ranking.top3[0].rank, 1);
        assert_eq!(ranking.top3[0].bib, "B");
        assert_eq!(ranking.top3[1].rank, 2);
        assert_eq!(ranking.top3[1].bib, "A");
    }

    #[test]
    fn test_missing_target_reports_not_ranked() {
        let records = vec![
            record("A", "Runner A", "10Km", "M", "00:30:00"),
            record("B", "Runner B", "10Km", "M", "00:28:00"),
        ];
        let stray = record("Z", "Stray", "10Km", "M", "00:29:00");

        let ranking = compute(&records, &stray);

        assert_eq!(ranking.overall_rank, NOT_RANKED);
        assert_eq!(ranking.gender_rank, NOT_RANKED);
        assert_eq!(ranking.total_course, 2);
        assert_eq!(ranking.top3.len(), 2);
    }

    #[test]
    fn test_groups_by_course_and_gender() {
        let records = vec![
            record("1", "M fast", "10Km", "M", "00:35:00"),
            record("2", "F fast", "10Km", "F", "00:38:00"),
            record("3", "M slow", "10Km", "M", "00:50:00"),
            record("4", "F slow", "10Km", "F", "00:55:00"),
            record("5", "Other course", "5Km", "F", "00:20:00"),
        ];

        let ranking = compute(&records, &records[3]);

        assert_eq!(ranking.overall_rank, 4);
        assert_eq!(ranking.gender_rank, 2);
        assert_eq!(ranking.total_course, 4);
        assert_eq!(ranking.total_gender, 2);
        assert_eq!(ranking.gender_label, "Woman");
        let bibs: Vec<&str> = ranking.top3.iter().map(|p| p.bib.as_str()).collect();
        assert_eq!(bibs, vec!["2", "4"]);
    }

    #[test]
    fn test_hours_are_compared_numerically() {
        let records = vec![
            record("slow", "Slow", "풀코스", "M", "10:00:00"),
            record("fast", "Fast", "풀코스", "M", "09:59:59"),
        ];

        let ranking = compute(&records, &records[0]);
        assert_eq!(ranking.overall_rank, 2);
        assert_eq!(ranking.top3[0].bib, "fast");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            record("first", "First", "5Km", "M", "00:20:00"),
            record("second", "Second", "5Km", "M", "00:20:00"),
            record("third", "Third", "5Km", "M", "00:20:00"),
        ];

        for (i, target) in records.iter().enumerate() {
            assert_eq!(compute(&records, target).overall_rank, i + 1);
        }
    }

    #[test]
    fn test_ranking_invariants_hold_for_every_runner() {
        let times = [
            "00:41:10", "00:39:59", "01:02:03", "00:45:00", "00:39:59", "00:52:30", "00:47:47",
        ];
        let records: Vec<Record> = times
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let gender = if i % 3 == 0 { "F" } else { "M" };
                record(&format!("{}", 100 + i), "Runner", "10Km", gender, t)
            })
            .collect();

        let fastest = records.iter().min_by_key(|r| elapsed_seconds(r)).unwrap();
        assert_eq!(compute(&records, fastest).overall_rank, 1);

        for target in &records {
            let ranking = compute(&records, target);
            assert!(ranking.overall_rank >= 1 && ranking.overall_rank <= ranking.total_course);
            assert!(ranking.gender_rank >= 1 && ranking.gender_rank <= ranking.total_gender);
            assert_eq!(ranking.top3.len(), ranking.total_gender.min(PODIUM_SIZE));
        }
    }

    #[test]
    fn test_top3_is_prefix_of_sorted_group() {
        let records = vec![
            record("a", "A", "10Km", "M", "00:50:00"),
            record("b", "B", "10Km", "M", "00:40:00"),
            record("c", "C", "10Km", "M", "00:45:00"),
            record("d", "D", "10Km", "M", "00:35:00"),
            record("e", "E", "10Km", "M", "00:55:00"),
        ];

        let ranking = compute(&records, &records[4]);
        let bibs: Vec<&str> = ranking.top3.iter().map(|p| p.bib.as_str()).collect();
        assert_eq!(bibs, vec!["d", "b", "c"]);
        assert_eq!(ranking.overall_rank, 5);
    }

    #[test]
    fn test_gender_label_passes_unknown_categories_through() {
        assert_eq!(gender_label("M"), "Man");
        assert_eq!(gender_label("X"), "X");
    }
}
