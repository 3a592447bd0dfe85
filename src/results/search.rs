//! Record search
//!
//! A record matches when its bib equals the query or its name contains the
//! query (case-sensitive). Results come back fastest first; ties keep the
//! order of the input slice.

use crate::models::Record;

use super::ranking::sort_by_finish;

/// Whether a record matches a search query
pub fn matches(record: &Record, query: &str) -> bool {
    record.bib == query || record.name.contains(query)
}

/// Filter an event's records by a non-empty query
pub fn search<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let mut found: Vec<&Record> = records.iter().filter(|r| matches(r, query)).collect();
    sort_by_finish(&mut found);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::fixtures::record;

    fn sample() -> Vec<Record> {
        vec![
            record("10006", "김현수", "10Km", "M", "00:46:45"),
            record("12858", "박민준", "10Km", "M", "00:32:53"),
            record("11667", "이준호", "10Km", "M", "00:33:08"),
            record("20001", "김민지", "5Km", "F", "00:28:45"),
            record("1000", "Kim Lee", "5Km", "F", "00:29:10"),
        ]
    }

    fn bibs(found: &[&Record]) -> Vec<String> {
        found.iter().map(|r| r.bib.clone()).collect()
    }

    #[test]
    fn test_exact_bib_returns_single_record() {
        let records = sample();
        assert_eq!(bibs(&search(&records, "12858")), vec!["12858"]);
    }

    #[test]
    fn test_bib_is_not_a_substring_match() {
        let records = sample();
        // "1000" is a prefix of "10006" but only the exact bib matches
        assert_eq!(bibs(&search(&records, "1000")), vec!["1000"]);
    }

    #[test]
    fn test_name_substring_matches() {
        let records = sample();
        assert_eq!(bibs(&search(&records, "김")), vec!["20001", "10006"]);
        assert_eq!(bibs(&search(&records, "민")), vec!["20001", "12858"]);
    }

    #[test]
    fn test_union_of_bib_and_name() {
        let mut records = sample();
        records.push(record("77", "Runner 12858", "10Km", "M", "00:31:00"));

        assert_eq!(bibs(&search(&records, "12858")), vec!["77", "12858"]);
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let records = sample();
        assert_eq!(bibs(&search(&records, "Kim")), vec!["1000"]);
        assert!(search(&records, "kim").is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = sample();
        assert!(search(&records, "없는사람").is_empty());
    }

    #[test]
    fn test_results_ordered_by_parsed_finish_time() {
        let records = vec![
            record("1", "Park A", "풀코스", "M", "10:00:00"),
            record("2", "Park B", "풀코스", "M", "09:00:00"),
            record("3", "Park C", "풀코스", "M", "09:00:00"),
        ];
        assert_eq!(bibs(&search(&records, "Park")), vec!["2", "3", "1"]);
    }
}
