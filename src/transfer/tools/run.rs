use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::transfer::tools::analysis::{self, TransferReport};
use crate::transfer::tools::combine::{self, CombinedPlan, PlanLabel};
use crate::transfer::tools::error::Result;
use crate::transfer::tools::io::{csv_report, excel_read, excel_write};
use crate::transfer::tools::model::{AsPlan, BsPlan, EquivalencyTable};

/// Outcome of the credit-transfer analysis: the computed report and the CSV
/// files written for it.
pub struct AnalysisOutput {
    pub report: TransferReport,
    pub files: Vec<PathBuf>,
}

/// Outcome of the plan merge: the combined plan and the workbook it was
/// written to.
pub struct CombineOutput {
    pub plan: CombinedPlan,
    pub path: PathBuf,
}

/// Analyzes how many AS credits transfer into the BS plan and writes the CSV
/// reports into `out_dir`.
#[instrument(
    level = "info",
    skip_all,
    fields(
        as_plan = %as_path.display(),
        bs_plan = %bs_path.display(),
        equivalencies = %equiv_path.display()
    )
)]
pub fn analyze(
    as_path: &Path,
    bs_path: &Path,
    equiv_path: &Path,
    sheet: Option<&str>,
    out_dir: &Path,
) -> Result<AnalysisOutput> {
    let (as_plan, bs_plan, equivalencies) = read_inputs(as_path, bs_path, equiv_path, sheet)?;
    let report = analysis::analyze(&as_plan, &bs_plan, &equivalencies);
    info!(
        total = report.summary.total_credits,
        matched = report.summary.matched_credits,
        unmatched_courses = report.unmatched.len(),
        "transfer analysis computed"
    );
    fs::create_dir_all(out_dir)?;
    let files = csv_report::write_report(out_dir, &report, &as_plan, &bs_plan)?;
    Ok(AnalysisOutput { report, files })
}

/// Merges the AS and BS plans of study into one formatted workbook. When no
/// output path is given the file name is derived from the input file names.
#[instrument(
    level = "info",
    skip_all,
    fields(
        as_plan = %as_path.display(),
        bs_plan = %bs_path.display(),
        equivalencies = %equiv_path.display()
    )
)]
pub fn combine(
    as_path: &Path,
    bs_path: &Path,
    equiv_path: &Path,
    sheet: Option<&str>,
    output: Option<&Path>,
) -> Result<CombineOutput> {
    let (as_plan, bs_plan, equivalencies) = read_inputs(as_path, bs_path, equiv_path, sheet)?;
    let plan = combine::merge(&as_plan, &bs_plan, &equivalencies);
    info!(rows = plan.rows.len(), "plans of study merged");
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let as_label = PlanLabel::from_path(as_path);
            let bs_label = PlanLabel::from_path(bs_path);
            PathBuf::from(combine::output_filename(&as_label, &bs_label))
        }
    };
    excel_write::write_combined_plan(&path, &plan)?;
    Ok(CombineOutput { plan, path })
}

fn read_inputs(
    as_path: &Path,
    bs_path: &Path,
    equiv_path: &Path,
    sheet: Option<&str>,
) -> Result<(AsPlan, BsPlan, EquivalencyTable)> {
    let as_plan = excel_read::read_as_plan(as_path)?;
    let bs_plan = excel_read::read_bs_plan(bs_path)?;
    let equivalencies = excel_read::read_equivalencies(equiv_path, sheet)?;
    debug!(
        as_courses = as_plan.courses.len(),
        bs_courses = bs_plan.courses.len(),
        equivalency_entries = equivalencies.len(),
        "inputs loaded"
    );
    Ok((as_plan, bs_plan, equivalencies))
}
