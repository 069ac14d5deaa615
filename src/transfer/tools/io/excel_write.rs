use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::transfer::tools::combine::{COLUMNS, CombinedPlan, CombinedRow};
use crate::transfer::tools::error::Result;
use crate::transfer::tools::model::Term;

/// Worksheet name of the merged plan.
pub const SHEET_NAME: &str = "combined_plan";

const MIN_COLUMN_WIDTH: f64 = 10.0;
const MAX_COLUMN_WIDTH: f64 = 60.0;

/// Writes the merged plan of study to an Excel workbook, formatted for
/// reading: bold header and term column, wrapped top-aligned cells, frozen
/// header row, column widths sized to the longest value.
pub fn write_combined_plan(path: &Path, plan: &CombinedPlan) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let bold_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top);
    let body_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    for (col_idx, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, *header, &bold_format)?;
    }

    for (row_idx, row) in plan.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        match &row.term {
            Term::Position(number) => {
                worksheet.write_number_with_format(excel_row, 0, f64::from(*number), &bold_format)?;
            }
            Term::Label(label) => {
                worksheet.write_string_with_format(excel_row, 0, label, &bold_format)?;
            }
        }
        worksheet.write_string_with_format(excel_row, 1, row.source.to_string(), &body_format)?;
        worksheet.write_string_with_format(excel_row, 2, row.match_mark(), &body_format)?;
        match &row.as_course {
            Some(code) => {
                worksheet.write_string_with_format(excel_row, 3, code, &body_format)?;
            }
            None => {
                worksheet.write_blank(excel_row, 3, &body_format)?;
            }
        }
        match row.as_credits {
            Some(credits) => {
                worksheet.write_number_with_format(excel_row, 4, credits, &body_format)?;
            }
            None => {
                worksheet.write_blank(excel_row, 4, &body_format)?;
            }
        }
        match &row.bs_course {
            Some(code) => {
                worksheet.write_string_with_format(excel_row, 5, code, &body_format)?;
            }
            None => {
                worksheet.write_blank(excel_row, 5, &body_format)?;
            }
        }
        worksheet.write_string_with_format(excel_row, 6, row.status.label(), &body_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    for (col_idx, chars) in column_widths(plan).iter().enumerate() {
        let width = ((chars + 2) as f64).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col_idx as u16, width)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Longest cell per column in characters, header included.
fn column_widths(plan: &CombinedPlan) -> [usize; COLUMNS.len()] {
    let mut widths = [0; COLUMNS.len()];
    for (col_idx, header) in COLUMNS.iter().enumerate() {
        widths[col_idx] = header.chars().count();
    }
    for row in &plan.rows {
        for (col_idx, text) in cell_texts(row).iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(text.chars().count());
        }
    }
    widths
}

fn cell_texts(row: &CombinedRow) -> [String; COLUMNS.len()] {
    [
        row.term.to_string(),
        row.source.to_string(),
        row.match_mark().to_string(),
        row.as_course.clone().unwrap_or_default(),
        row.as_credits
            .map(|credits| credits.to_string())
            .unwrap_or_default(),
        row.bs_course.clone().unwrap_or_default(),
        row.status.label().to_string(),
    ]
}
