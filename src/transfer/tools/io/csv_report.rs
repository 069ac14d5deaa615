use std::path::{Path, PathBuf};

use csv::Writer;
use serde::Serialize;

use crate::transfer::tools::analysis::TransferReport;
use crate::transfer::tools::error::Result;
use crate::transfer::tools::model::{AsPlan, BsPlan};

/// File names of the four analysis reports.
pub const SUMMARY_FILE: &str = "individual_summary.csv";
pub const UNMATCHED_FILE: &str = "individual_unmatched_courses.csv";
pub const AS_NORMALIZED_FILE: &str = "individual_as_normalized.csv";
pub const BS_NORMALIZED_FILE: &str = "individual_bs_normalized.csv";

#[derive(Serialize)]
struct NormalizedAsRow<'a> {
    #[serde(rename = "Normalized_Code")]
    code: &'a str,
    #[serde(rename = "Credit_Hours")]
    credits: f64,
}

#[derive(Serialize)]
struct NormalizedBsRow<'a> {
    #[serde(rename = "Normalized_Code")]
    code: &'a str,
}

/// Writes the four analysis reports into `out_dir`: the credit summary, the
/// unmatched AS courses, and the normalized AS and BS plans as they were
/// read. Returns the written paths in that order.
pub fn write_report(
    out_dir: &Path,
    report: &TransferReport,
    as_plan: &AsPlan,
    bs_plan: &BsPlan,
) -> Result<Vec<PathBuf>> {
    let summary_path = out_dir.join(SUMMARY_FILE);
    let unmatched_path = out_dir.join(UNMATCHED_FILE);
    let as_path = out_dir.join(AS_NORMALIZED_FILE);
    let bs_path = out_dir.join(BS_NORMALIZED_FILE);

    write_summary(&summary_path, report)?;
    write_unmatched(&unmatched_path, report)?;
    write_as_normalized(&as_path, as_plan)?;
    write_bs_normalized(&bs_path, bs_plan)?;

    Ok(vec![summary_path, unmatched_path, as_path, bs_path])
}

fn write_summary(path: &Path, report: &TransferReport) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.serialize(&report.summary)?;
    writer.flush()?;
    Ok(())
}

// The header row is written even when every AS course matched, so the file
// keeps a stable shape for downstream spreadsheets.
fn write_unmatched(path: &Path, report: &TransferReport) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    if report.unmatched.is_empty() {
        writer.write_record(["AS Course Code", "Credits"])?;
    } else {
        for course in &report.unmatched {
            writer.serialize(course)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_as_normalized(path: &Path, plan: &AsPlan) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    if plan.courses.is_empty() {
        writer.write_record(["Normalized_Code", "Credit_Hours"])?;
    } else {
        for course in &plan.courses {
            writer.serialize(NormalizedAsRow {
                code: &course.code,
                credits: course.credits,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_bs_normalized(path: &Path, plan: &BsPlan) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    if plan.courses.is_empty() {
        writer.write_record(["Normalized_Code"])?;
    } else {
        for course in &plan.courses {
            writer.serialize(NormalizedBsRow { code: &course.code })?;
        }
    }
    writer.flush()?;
    Ok(())
}
