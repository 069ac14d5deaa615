use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::transfer::tools::error::{Result, ToolError};
use crate::transfer::tools::model::{
    AsCourse, AsPlan, BsCourse, BsPlan, CourseCode, EquivalencyTable, Term, normalize_code,
    split_codes,
};

// Header candidates for each logical column, in priority order. Matching is
// case-insensitive on substrings, so both "Course_Name" and "Course Name"
// headers resolve.
const AS_CODE_COLUMNS: &[&str] = &["course_name", "course code", "course_code", "name", "code"];
const AS_CREDITS_COLUMNS: &[&str] = &["credit_hours", "credits", "credit hours"];
const BS_CODE_COLUMNS: &[&str] = &["name", "course_name", "course code", "course_code", "code"];
const EQUIV_AS_COLUMNS: &[&str] = &["course_code", "as_code"];
const EQUIV_BS_COLUMNS: &[&str] = &["equivalent course code", "equivalent"];

/// Reads one AS plan from the first worksheet of an Excel workbook.
///
/// Rows without a course code or without numeric credits are skipped, the way
/// hand-maintained plan sheets expect. Term values come from a term column
/// when one exists, otherwise from the 1-based row position.
pub fn read_as_plan(path: &Path) -> Result<AsPlan> {
    let range = read_first_sheet(path)?;
    let headers = header_row(&range);
    let code_col = find_column(&headers, AS_CODE_COLUMNS, "AS course-code")?;
    let credits_col = find_column(&headers, AS_CREDITS_COLUMNS, "AS credits")?;
    let term_col = find_term_column(&headers);

    let mut courses = Vec::new();
    for (position, row) in range.rows().skip(1).enumerate() {
        let Some(code) = cell_code(row.get(code_col)) else {
            continue;
        };
        let Some(credits) = cell_number(row.get(credits_col)) else {
            continue;
        };
        let term = row_term(row, term_col, position);
        courses.push(AsCourse { code, credits, term });
    }

    Ok(AsPlan { courses })
}

/// Reads one BS plan from the first worksheet of an Excel workbook. Only the
/// course code is required per row.
pub fn read_bs_plan(path: &Path) -> Result<BsPlan> {
    let range = read_first_sheet(path)?;
    let headers = header_row(&range);
    let code_col = find_column(&headers, BS_CODE_COLUMNS, "BS course-code")?;
    let term_col = find_term_column(&headers);

    let mut courses = Vec::new();
    for (position, row) in range.rows().skip(1).enumerate() {
        let Some(code) = cell_code(row.get(code_col)) else {
            continue;
        };
        let term = row_term(row, term_col, position);
        courses.push(BsCourse { code, term });
    }

    Ok(BsPlan { courses })
}

/// Reads the course-equivalency table. The BS cell may list several codes
/// separated by semicolons; an empty cell records an AS course with no
/// equivalents. `sheet` selects a worksheet by name, defaulting to the first.
pub fn read_equivalencies(path: &Path, sheet: Option<&str>) -> Result<EquivalencyTable> {
    let range = match sheet {
        Some(name) => read_named_sheet(path, name)?,
        None => read_first_sheet(path)?,
    };
    let headers = header_row(&range);
    let as_col = find_column(&headers, EQUIV_AS_COLUMNS, "Equivalency AS code")?;
    let bs_col = find_column(&headers, EQUIV_BS_COLUMNS, "Equivalency BS code")?;

    let mut table = EquivalencyTable::new();
    for row in range.rows().skip(1) {
        let Some(as_code) = cell_code(row.get(as_col)) else {
            continue;
        };
        let bs_codes = split_codes(&cell_to_string(row.get(bs_col)));
        table.insert(as_code, bs_codes);
    }

    Ok(table)
}

fn read_first_sheet(path: &Path) -> Result<calamine::Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::EmptyWorkbook(path.to_path_buf()))?;
    Ok(range?)
}

fn read_named_sheet(path: &Path, name: &str) -> Result<calamine::Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let Some(range) = workbook.worksheet_range(name) else {
        return Err(ToolError::MissingSheet {
            name: name.to_string(),
            available: workbook.sheet_names().to_vec(),
        });
    };
    Ok(range?)
}

fn header_row(range: &calamine::Range<DataType>) -> Vec<String> {
    range
        .rows()
        .next()
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .unwrap_or_default()
}

/// Finds the column for a logical field: candidates are tried in priority
/// order, each matched case-insensitively as a substring of the headers.
fn find_column(
    headers: &[String],
    candidates: &'static [&'static str],
    label: &'static str,
) -> Result<usize> {
    let lowered: Vec<String> = headers.iter().map(|header| header.to_lowercase()).collect();
    for candidate in candidates {
        if let Some(index) = lowered.iter().position(|header| header.contains(candidate)) {
            return Ok(index);
        }
    }
    Err(ToolError::MissingColumn {
        label,
        candidates,
        headers: headers.to_vec(),
    })
}

fn find_term_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.to_lowercase().contains("term"))
}

/// Term for a data row: the term column when present and non-empty, else the
/// 1-based row position. Positions count every data row, including ones the
/// caller later skips, so they mirror the spreadsheet layout.
fn row_term(row: &[DataType], term_col: Option<usize>, position: usize) -> Term {
    term_col
        .and_then(|index| row.get(index))
        .and_then(cell_term)
        .unwrap_or(Term::Position(position as u32 + 1))
}

fn cell_code(cell: Option<&DataType>) -> Option<CourseCode> {
    normalize_code(&cell_to_string(cell))
}

/// Lenient numeric coercion: numbers pass through, numeric text parses,
/// anything else is treated as absent. Text that parses to NaN counts as
/// absent too.
fn cell_number(cell: Option<&DataType>) -> Option<f64> {
    let number = match cell {
        Some(DataType::Float(value)) => Some(*value),
        Some(DataType::Int(value)) => Some(*value as f64),
        Some(DataType::String(value)) => value.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|value| !value.is_nan())
}

fn cell_term(cell: &DataType) -> Option<Term> {
    match cell {
        DataType::Float(value) => Some(Term::from_number(*value)),
        DataType::Int(value) => Some(Term::from_number(*value as f64)),
        DataType::String(value) => Term::parse(value),
        DataType::Empty => None,
        other => Term::parse(&other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
