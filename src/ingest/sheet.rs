//! Result sheets
//!
//! Turns an uploaded sheet into [`RecordPayload`]s. Excel workbooks (`.xlsx`,
//! `.xls`) and CSV files are accepted; the format is taken from the file's
//! leading bytes, not its name. Only the header row is validated here; row
//! content goes through the same validation as JSON uploads.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use csv::StringRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::{
    models::RecordPayload,
    utils::{format_hms, time::SECONDS_PER_DAY},
};

use super::headers::{HeaderError, HeaderMapping, RecordField, TEMPLATE_HEADERS};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
/// Zip container used by `.xlsx`
const XLSX_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE compound file used by legacy `.xls`
const XLS_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Download name of the Excel sample sheet
pub const TEMPLATE_FILE_NAME: &str = "records_template.xlsx";
/// Download name of the CSV sample sheet
pub const TEMPLATE_CSV_FILE_NAME: &str = "records_template.csv";

const TEMPLATE_SHEET_NAME: &str = "기록";

const TEMPLATE_ROWS: [[&str; 7]; 3] = [
    ["10001", "홍길동", "10Km", "M", "00:45:30", "13.19", "04:33"],
    ["10002", "김철수", "10Km", "M", "00:52:10", "11.50", "05:13"],
    ["20001", "이영희", "5Km", "F", "00:28:45", "10.43", "05:45"],
];

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("spreadsheet contains no header row")]
    Empty,

    #[error("{0}")]
    Headers(#[from] HeaderError),

    #[error("row {row}: {source}")]
    Row { row: usize, source: csv::Error },

    #[error("spreadsheet could not be read: {0}")]
    Read(#[from] csv::Error),

    #[error("workbook could not be read: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no worksheet")]
    NoWorksheet,
}

/// Container format of an uploaded sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SheetFormat {
    /// Sniff the format from the leading bytes; anything else is read as CSV
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(XLSX_MAGIC) {
            Self::Xlsx
        } else if bytes.starts_with(XLS_MAGIC) {
            Self::Xls
        } else {
            Self::Csv
        }
    }
}

/// Parse an uploaded sheet of any supported format
pub fn parse_sheet(bytes: &[u8]) -> Result<Vec<RecordPayload>, IngestError> {
    match SheetFormat::detect(bytes) {
        SheetFormat::Xlsx | SheetFormat::Xls => parse_workbook(bytes),
        SheetFormat::Csv => parse_csv(bytes),
    }
}

/// Parse a CSV sheet into upload payloads
///
/// Blank rows are skipped. Speed and pace cells are read but never trusted.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RecordPayload>, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let mapping = resolve_headers(&headers)?;

    let mut payloads = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Row 1 is the header
        let line = idx + 2;
        let row = result.map_err(|source| IngestError::Row { row: line, source })?;
        if let Some(payload) = payload_from_row(&mapping, &row, line) {
            payloads.push(payload);
        }
    }

    Ok(payloads)
}

/// Parse the first worksheet of an Excel workbook
///
/// The first non-empty row is the header. Row numbers match the sheet as
/// Excel shows it.
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<RecordPayload>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);
    let mut rows = range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect::<StringRecord>());

    let headers = rows.next().ok_or(IngestError::Empty)?;
    let mapping = resolve_headers(&headers)?;

    Ok(rows
        .enumerate()
        .filter_map(|(idx, row)| payload_from_row(&mapping, &row, first_line + idx + 1))
        .collect())
}

fn resolve_headers(headers: &StringRecord) -> Result<HeaderMapping, IngestError> {
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::Empty);
    }
    Ok(HeaderMapping::resolve(headers.iter())?)
}

/// Build a payload from one data row; `None` for a blank row
fn payload_from_row(
    mapping: &HeaderMapping,
    row: &StringRecord,
    line: usize,
) -> Option<RecordPayload> {
    if row.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }

    let text = |field| mapping.cell(row, field).unwrap_or_default().to_string();
    let optional = |field| mapping.cell(row, field).filter(|s| !s.is_empty());

    Some(RecordPayload {
        bib: text(RecordField::Bib),
        name: text(RecordField::Name),
        course: text(RecordField::Course),
        gender: text(RecordField::Gender),
        finish_time: text(RecordField::FinishTime),
        speed: optional(RecordField::Speed).and_then(|s| s.parse().ok()),
        pace: optional(RecordField::Pace).map(str::to_string),
        splits: Vec::new(),
        source_row: Some(line),
    })
}

/// Text of a workbook cell as an organizer would read it
///
/// Time-formatted cells hold a fraction of a day and come back as
/// `HH:MM:SS`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::DateTime(dt) => day_fraction_to_hms(dt.as_f64()),
        other => other.to_string(),
    }
}

fn day_fraction_to_hms(days: f64) -> String {
    let seconds = (days.fract() * f64::from(SECONDS_PER_DAY)).round() as u32;
    let whole_days = days.trunc().max(0.0) as u32;
    format_hms(whole_days * SECONDS_PER_DAY + seconds)
}

/// CSV sample sheet with the canonical headers and a few example rows
pub fn template_csv() -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(TEMPLATE_HEADERS)?;
    for row in TEMPLATE_ROWS {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Excel sample sheet with the canonical headers and a few example rows
///
/// Every cell is written as text so times keep their `HH:MM:SS` shape.
pub fn template_xlsx() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET_NAME)?;

    for (col, header) in TEMPLATE_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, 12)?;
    }
    for (row, cells) in TEMPLATE_ROWS.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, *cell)?;
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_korean_sheet_with_bom() {
        let sheet = "\u{FEFF}배번호,이름,코스,성별,완주시간,스피드,페이스\n\
                     10001,홍길동,10Km,M,00:45:30,13.19,04:33\n\
                     20001,이영희,5Km,F,00:28:45,,\n";

        let rows = parse_csv(sheet.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bib, "10001");
        assert_eq!(rows[0].name, "홍길동");
        assert_eq!(rows[0].finish_time, "00:45:30");
        assert_eq!(rows[0].speed, Some(13.19));
        assert_eq!(rows[1].pace, None);
        assert!(rows[1].splits.is_empty());
    }

    #[test]
    fn test_parse_english_headers_and_skips_blank_rows() {
        let sheet = "bib,name,course,gender,finish_time\n\
                     1,Kim,5Km,F,00:30:00\n\
                     ,,,,\n\
                     2,Lee,5Km,M,00:29:00\n";

        let rows = parse_csv(sheet.as_bytes()).unwrap();
        let bibs: Vec<&str> = rows.iter().map(|r| r.bib.as_str()).collect();
        assert_eq!(bibs, vec!["1", "2"]);
    }

    #[test]
    fn test_rows_keep_their_sheet_line() {
        let sheet = "bib,name,course,gender,finishTime\n\
                     ,,,,\n\
                     1,Kim,5Km,F,00:30:00\n\
                     2,,5Km,M,00:29:00\n";

        let rows = parse_csv(sheet.as_bytes()).unwrap();
        let lines: Vec<Option<usize>> = rows.iter().map(|r| r.source_row).collect();
        assert_eq!(lines, vec![Some(3), Some(4)]);
    }

    #[test]
    fn test_missing_cells_become_empty_fields() {
        let sheet = "bib,name,course,gender,finishTime\n7,Park\n";

        let rows = parse_csv(sheet.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Park");
        assert_eq!(rows[0].course, "");
        assert_eq!(rows[0].finish_time, "");
    }

    #[test]
    fn test_unknown_header_rejects_file() {
        let sheet = "bib,name,course,gender,finishTime,rank\n1,Kim,5Km,F,00:30:00,1\n";

        match parse_csv(sheet.as_bytes()) {
            Err(IngestError::Headers(err)) => assert_eq!(err.unrecognized, vec!["rank"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(matches!(parse_csv(b""), Err(IngestError::Empty)));
    }

    #[test]
    fn test_format_is_sniffed_from_leading_bytes() {
        assert_eq!(SheetFormat::detect(b"PK\x03\x04rest"), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::detect(XLS_MAGIC), SheetFormat::Xls);
        assert_eq!(SheetFormat::detect("배번호,이름".as_bytes()), SheetFormat::Csv);
        assert_eq!(SheetFormat::detect(b""), SheetFormat::Csv);
    }

    #[test]
    fn test_csv_template_parses_back() {
        let bytes = template_csv().unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let rows = parse_sheet(&bytes).unwrap();
        assert_eq!(rows.len(), TEMPLATE_ROWS.len());
        assert_eq!(rows[2].course, "5Km");
    }

    #[test]
    fn test_xlsx_template_parses_back() {
        let bytes = template_xlsx().unwrap();
        assert_eq!(SheetFormat::detect(&bytes), SheetFormat::Xlsx);

        let rows = parse_sheet(&bytes).unwrap();
        assert_eq!(rows.len(), TEMPLATE_ROWS.len());
        assert_eq!(rows[0].bib, "10001");
        assert_eq!(rows[0].name, "홍길동");
        assert_eq!(rows[0].finish_time, "00:45:30");
        assert_eq!(rows[2].course, "5Km");
        assert_eq!(rows[2].source_row, Some(4));
    }

    #[test]
    fn test_workbook_with_typed_cells() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["bib", "name", "course", "gender", "finishTime"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        // Numeric bib and a time typed as a fraction of a day
        sheet.write_number(2, 0, 12858).unwrap();
        sheet.write_string(2, 1, "박민준").unwrap();
        sheet.write_string(2, 2, "10Km").unwrap();
        sheet.write_string(2, 3, "M").unwrap();
        let time_format = Format::new().set_num_format("hh:mm:ss");
        let finish = (32.0 * 60.0 + 53.0) / 86_400.0;
        sheet.write_number_with_format(2, 4, finish, &time_format).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_workbook(&bytes).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bib, "12858");
        assert_eq!(rows[0].finish_time, "00:32:53");
        assert_eq!(rows[0].source_row, Some(3));
    }

    #[test]
    fn test_workbook_with_unknown_header_is_rejected() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "rank").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        match parse_workbook(&bytes) {
            Err(IngestError::Headers(err)) => {
                assert_eq!(err.unrecognized, vec!["rank"]);
                assert!(err.missing.contains(&"bib"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_day_fraction_to_hms() {
        assert_eq!(day_fraction_to_hms(0.5), "12:00:00");
        assert_eq!(day_fraction_to_hms(1.25), "30:00:00");
    }
}
