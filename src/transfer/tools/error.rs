use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tools ingest plan workbooks, compute transfers, or emit reports.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the CSV report writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when a workbook contains no worksheets at all.
    #[error("workbook has no worksheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    /// Raised when a requested worksheet is absent from the workbook.
    #[error("worksheet '{name}' not found; available sheets: {available:?}")]
    MissingSheet {
        name: String,
        available: Vec<String>,
    },

    /// Raised when none of the candidate headers for a required column are
    /// present in a worksheet.
    #[error("{label} column not found; looked for any of {candidates:?} in {headers:?}")]
    MissingColumn {
        label: &'static str,
        candidates: &'static [&'static str],
        headers: Vec<String>,
    },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
