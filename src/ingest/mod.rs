//! Result sheet ingestion

pub mod headers;
pub mod sheet;

pub use headers::{HeaderError, HeaderMapping, RecordField};
pub use sheet::{
    IngestError, SheetFormat, TEMPLATE_CSV_FILE_NAME, TEMPLATE_FILE_NAME, parse_csv, parse_sheet,
    parse_workbook, template_csv, template_xlsx,
};
