//! Spreadsheet header mapping
//!
//! Result sheets arrive with Korean or English column names. Each header is
//! resolved once per file through [`HEADER_MAP`]; unknown, duplicated or
//! missing required columns reject the whole file.

use std::collections::HashMap;
use std::fmt;

/// Canonical record field a column maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Bib,
    Name,
    Course,
    Gender,
    FinishTime,
    Speed,
    Pace,
}

impl RecordField {
    /// Fields every sheet must provide
    pub const REQUIRED: [RecordField; 5] = [
        RecordField::Bib,
        RecordField::Name,
        RecordField::Course,
        RecordField::Gender,
        RecordField::FinishTime,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Bib => "bib",
            Self::Name => "name",
            Self::Course => "course",
            Self::Gender => "gender",
            Self::FinishTime => "finishTime",
            Self::Speed => "speed",
            Self::Pace => "pace",
        }
    }
}

/// Recognized header → canonical field
pub const HEADER_MAP: &[(&str, RecordField)] = &[
    ("배번호", RecordField::Bib),
    ("bib", RecordField::Bib),
    ("이름", RecordField::Name),
    ("name", RecordField::Name),
    ("코스", RecordField::Course),
    ("course", RecordField::Course),
    ("성별", RecordField::Gender),
    ("gender", RecordField::Gender),
    ("완주시간", RecordField::FinishTime),
    ("finishTime", RecordField::FinishTime),
    ("finish_time", RecordField::FinishTime),
    ("스피드", RecordField::Speed),
    ("speed", RecordField::Speed),
    ("페이스", RecordField::Pace),
    ("pace", RecordField::Pace),
];

/// Canonical Korean headers, in template order
pub const TEMPLATE_HEADERS: [&str; 7] = ["배번호", "이름", "코스", "성별", "완주시간", "스피드", "페이스"];

/// Look up the field for a header cell
pub fn field_for(header: &str) -> Option<RecordField> {
    let header = header.trim();
    HEADER_MAP
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(header))
        .map(|(_, field)| *field)
}

/// Header row problems, all reported at once
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
pub struct HeaderError {
    pub unrecognized: Vec<String>,
    pub duplicated: Vec<String>,
    pub missing: Vec<&'static str>,
}

impl HeaderError {
    fn is_empty(&self) -> bool {
        self.unrecognized.is_empty() && self.duplicated.is_empty() && self.missing.is_empty()
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.unrecognized.is_empty() {
            parts.push(format!("unrecognized headers: {}", self.unrecognized.join(", ")));
        }
        if !self.duplicated.is_empty() {
            parts.push(format!("duplicated columns: {}", self.duplicated.join(", ")));
        }
        if !self.missing.is_empty() {
            parts.push(format!("missing required headers: {}", self.missing.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Column index of every mapped field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapping {
    columns: HashMap<RecordField, usize>,
}

impl HeaderMapping {
    /// Resolve a header row
    pub fn resolve<'a, I>(headers: I) -> Result<Self, HeaderError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut columns = HashMap::new();
        let mut error = HeaderError::default();

        for (idx, header) in headers.into_iter().enumerate() {
            match field_for(header) {
                Some(field) => {
                    if columns.insert(field, idx).is_some() {
                        error.duplicated.push(header.trim().to_string());
                    }
                }
                None => error.unrecognized.push(header.trim().to_string()),
            }
        }

        error.missing = RecordField::REQUIRED
            .iter()
            .filter(|f| !columns.contains_key(f))
            .map(|f| f.canonical_name())
            .collect();

        if error.is_empty() {
            Ok(Self { columns })
        } else {
            Err(error)
        }
    }

    /// Cell of `field` in `row`, trimmed; `None` when the column is absent
    pub fn cell<'r>(&self, row: &'r csv::StringRecord, field: RecordField) -> Option<&'r str> {
        self.columns
            .get(&field)
            .and_then(|idx| row.get(*idx))
            .map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_and_english_headers_resolve() {
        assert_eq!(field_for("배번호"), Some(RecordField::Bib));
        assert_eq!(field_for(" Bib "), Some(RecordField::Bib));
        assert_eq!(field_for("완주시간"), Some(RecordField::FinishTime));
        assert_eq!(field_for("finishtime"), Some(RecordField::FinishTime));
        assert_eq!(field_for("순위"), None);
    }

    #[test]
    fn test_resolve_full_korean_row() {
        let mapping = HeaderMapping::resolve(TEMPLATE_HEADERS).unwrap();
        let row = csv::StringRecord::from(vec!["10001", " 홍길동 ", "10Km", "M", "00:45:30", "", ""]);

        assert_eq!(mapping.cell(&row, RecordField::Bib), Some("10001"));
        assert_eq!(mapping.cell(&row, RecordField::Name), Some("홍길동"));
        assert_eq!(mapping.cell(&row, RecordField::Pace), Some(""));
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let mapping =
            HeaderMapping::resolve(["bib", "name", "course", "gender", "finishTime"]).unwrap();
        let row = csv::StringRecord::from(vec!["1", "A", "5Km", "F", "00:30:00"]);
        assert_eq!(mapping.cell(&row, RecordField::Speed), None);
    }

    #[test]
    fn test_resolve_reports_every_problem() {
        let err = HeaderMapping::resolve(["배번호", "bib", "이름", "순위"]).unwrap_err();

        assert_eq!(err.unrecognized, vec!["순위".to_string()]);
        assert_eq!(err.duplicated, vec!["bib".to_string()]);
        assert_eq!(err.missing, vec!["course", "gender", "finishTime"]);

        let message = err.to_string();
        assert!(message.contains("unrecognized headers: 순위"));
        assert!(message.contains("missing required headers: course, gender, finishTime"));
    }
}
