use serde::Serialize;

use crate::transfer::tools::model::{AsPlan, BsPlan, CourseCode, EquivalencyTable};

/// Headline figures for one AS→BS transfer analysis. The serde renames carry
/// the column headers the summary CSV has always used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferSummary {
    #[serde(rename = "Total AS Credits")]
    pub total_credits: f64,
    #[serde(rename = "Matched Credits")]
    pub matched_credits: f64,
    #[serde(rename = "Lost Credits")]
    pub lost_credits: f64,
    /// Fraction of AS credit hours lost in transfer; 0 is a perfect match.
    #[serde(rename = "Loss Score (0=perfect)")]
    pub loss_score: f64,
}

/// AS course whose credits found no equivalent in the BS plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedCourse {
    #[serde(rename = "AS Course Code")]
    pub code: CourseCode,
    #[serde(rename = "Credits")]
    pub credits: f64,
}

/// Result of comparing one AS plan against one BS plan.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReport {
    pub summary: TransferSummary,
    /// Unmatched AS courses, in plan order.
    pub unmatched: Vec<UnmatchedCourse>,
}

/// Computes matched and lost credit hours for an AS plan against a BS plan.
///
/// An AS course counts as matched when any of its listed equivalents appears
/// in the BS plan; its full credit hours then transfer. An empty AS plan
/// scores a full loss rather than dividing by zero.
pub fn analyze(
    as_plan: &AsPlan,
    bs_plan: &BsPlan,
    equivalencies: &EquivalencyTable,
) -> TransferReport {
    let bs_codes = bs_plan.code_set();

    let mut matched = 0.0;
    let mut unmatched = Vec::new();

    for course in &as_plan.courses {
        let transfers = equivalencies
            .equivalents(&course.code)
            .iter()
            .any(|bs_code| bs_codes.contains(bs_code.as_str()));
        if transfers {
            matched += course.credits;
        } else {
            unmatched.push(UnmatchedCourse {
                code: course.code.clone(),
                credits: course.credits,
            });
        }
    }

    let total = as_plan.total_credits();
    let lost = (total - matched).max(0.0);
    let loss_score = if total > 0.0 { round4(lost / total) } else { 1.0 };

    TransferReport {
        summary: TransferSummary {
            total_credits: total,
            matched_credits: matched,
            lost_credits: lost,
            loss_score,
        },
        unmatched,
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
