//! Spreadsheet and CSV encoding of compiled reports.

use std::fmt;
use std::str::FromStr;

use checklist_core::model::{REPORT_HEADER, Report};
use rust_xlsxwriter::{Format, Workbook};
use storage::ExportArtifact;

use crate::error::SerializationError;

pub const SHEET_NAME: &str = "Respostas";
pub const XLSX_FILE_NAME: &str = "respostas_cx.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_FILE_NAME: &str = "respostas_cx.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Last row index a worksheet can address (1,048,576 rows, zero based).
const MAX_SHEET_ROW: u32 = 1_048_575;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => XLSX_FILE_NAME,
            ExportFormat::Csv => CSV_FILE_NAME,
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => XLSX_CONTENT_TYPE,
            ExportFormat::Csv => CSV_CONTENT_TYPE,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Xlsx => f.write_str("xlsx"),
            ExportFormat::Csv => f.write_str("csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExportFormat(pub String);

impl fmt::Display for UnknownExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown export format: {} (expected xlsx or csv)", self.0)
    }
}

impl std::error::Error for UnknownExportFormat {}

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            _ => Err(UnknownExportFormat(s.to_owned())),
        }
    }
}

/// Header plus one row per report record, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    rows: Vec<[String; 4]>,
}

impl ExportTable {
    #[must_use]
    pub fn from_report(report: &Report) -> Self {
        let rows = report
            .records()
            .iter()
            .map(|record| record.cells().map(str::to_owned))
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn header(&self) -> [&'static str; 4] {
        REPORT_HEADER
    }

    /// Data rows, excluding the header.
    #[must_use]
    pub fn rows(&self) -> &[[String; 4]] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Encode the table in the given format.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the encoder fails or the table does not
    /// fit in a worksheet.
    pub fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, SerializationError> {
        match format {
            ExportFormat::Xlsx => self.encode_xlsx(),
            ExportFormat::Csv => self.encode_csv(),
        }
    }

    fn encode_xlsx(&self) -> Result<Vec<u8>, SerializationError> {
        let last_row = u32::try_from(self.rows.len())
            .ok()
            .filter(|&n| n <= MAX_SHEET_ROW)
            .ok_or(SerializationError::TooManyRows {
                rows: self.rows.len(),
            })?;

        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, title) in (0_u16..).zip(self.header()) {
            sheet.write_string_with_format(0, col, title, &bold)?;
        }
        for (row, cells) in (1..=last_row).zip(&self.rows) {
            for (col, cell) in (0_u16..).zip(cells) {
                sheet.write_string(row, col, cell.as_str())?;
            }
        }
        sheet.set_column_width(0, 40)?;
        sheet.set_column_width(1, 40)?;
        sheet.set_column_width(2, 80)?;

        Ok(workbook.save_to_buffer()?)
    }

    fn encode_csv(&self) -> Result<Vec<u8>, SerializationError> {
        let csv_err = |e: csv::Error| SerializationError::Csv(e.to_string());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.header()).map_err(csv_err)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_err)?;
        }
        writer
            .into_inner()
            .map_err(|e| SerializationError::Csv(e.to_string()))
    }
}

/// Encode every record of `report` as a downloadable artifact.
///
/// # Errors
///
/// Returns `SerializationError` if encoding fails.
pub fn export_report(
    report: &Report,
    format: ExportFormat,
) -> Result<ExportArtifact, SerializationError> {
    let bytes = ExportTable::from_report(report).encode(format)?;
    Ok(ExportArtifact {
        file_name: format.file_name().to_owned(),
        content_type: format.content_type().to_owned(),
        bytes,
    })
}
