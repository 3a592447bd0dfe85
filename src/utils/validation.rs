//! Input validation utilities

use std::collections::HashSet;

use crate::{constants, results::metrics};

/// Validate poster slider type
pub fn validate_poster_type(poster_type: &str) -> Result<(), &'static str> {
    if constants::poster_types::ALL.contains(&poster_type) {
        Ok(())
    } else {
        Err("Invalid poster type. Use 'hero' or 'next'")
    }
}

/// Validate and normalize an event's course list
///
/// Labels are trimmed; the list must be non-empty, duplicate-free and
/// contain only courses with a known distance. Labels differing only in
/// case count as duplicates, matching the distance lookup. Display order is
/// kept.
pub fn validate_courses(courses: &[String]) -> Result<Vec<String>, String> {
    let normalized: Vec<String> = courses
        .iter()
        .map(|c| sanitize_string(c))
        .filter(|c| !c.is_empty())
        .collect();

    if normalized.is_empty() {
        return Err("An event needs at least one course".to_string());
    }

    let mut seen = HashSet::new();
    for course in &normalized {
        if !seen.insert(course.to_lowercase()) {
            return Err(format!("Duplicate course '{}'", course));
        }
        if metrics::course_distance_km(course).is_none() {
            return Err(format!("Unknown course '{}'", course));
        }
    }

    Ok(normalized)
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_poster_type() {
        assert!(validate_poster_type("hero").is_ok());
        assert!(validate_poster_type("next").is_ok());
        assert!(validate_poster_type("banner").is_err());
    }

    #[test]
    fn test_validate_courses() {
        let courses = vec![" 5Km".to_string(), "하프".to_string(), "풀코스".to_string()];
        assert_eq!(
            validate_courses(&courses).unwrap(),
            vec!["5Km".to_string(), "하프".to_string(), "풀코스".to_string()]
        );

        assert!(validate_courses(&[]).is_err());
        assert!(validate_courses(&["  ".to_string()]).is_err());
        assert!(validate_courses(&["5Km".to_string(), "5Km".to_string()]).is_err());
        assert!(validate_courses(&["7Km".to_string()]).is_err());
    }

    #[test]
    fn test_courses_differing_only_in_case_are_duplicates() {
        let err = validate_courses(&["5Km".to_string(), "5km".to_string()]).unwrap_err();
        assert_eq!(err, "Duplicate course '5km'");

        assert!(validate_courses(&["full".to_string(), "FULL".to_string()]).is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  hello\u{0}  "), "hello");
    }
}
