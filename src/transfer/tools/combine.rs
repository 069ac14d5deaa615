use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::transfer::tools::model::{AsPlan, BsPlan, CourseCode, EquivalencyTable, Term, clean_text};

/// Column headers of the combined worksheet, in output order.
pub const COLUMNS: [&str; 7] = [
    "Term",
    "Source",
    "Match",
    "AS Course",
    "AS Credits",
    "BS Course",
    "Status",
];

/// Which plan a combined row came from. AS rows sort ahead of BS rows within
/// the same term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Source {
    As,
    Bs,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::As => write!(f, "AS"),
            Source::Bs => write!(f, "BS"),
        }
    }
}

/// Transfer outcome recorded in the Status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Transferred,
    NotTransferred,
    ToComplete,
}

impl Status {
    /// Status text as it appears in the worksheet.
    pub fn label(self) -> &'static str {
        match self {
            Status::Transferred => "Transferred",
            Status::NotTransferred => "Not transferred",
            Status::ToComplete => "To complete at BS",
        }
    }
}

/// One row of the combined plan of study.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRow {
    pub term: Term,
    pub source: Source,
    /// Transfer check for AS rows; `None` for BS rows, whose Match cell stays
    /// empty.
    pub matched: Option<bool>,
    pub as_course: Option<CourseCode>,
    pub as_credits: Option<f64>,
    pub bs_course: Option<CourseCode>,
    pub status: Status,
}

impl CombinedRow {
    /// Mark written to the Match column.
    pub fn match_mark(&self) -> &'static str {
        match self.matched {
            Some(true) => "✅",
            Some(false) => "❌",
            None => "",
        }
    }
}

/// The merged plan of study, sorted by term with AS rows first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedPlan {
    pub rows: Vec<CombinedRow>,
}

/// Merges an AS plan and a BS plan into one combined plan of study.
///
/// Each AS course keeps its term and credits and records whether it
/// transfers; the chosen BS course is the first listed equivalent that occurs
/// in the BS plan. BS courses not consumed by a transfer are appended as
/// still to complete. Consumption is by code, so duplicate BS rows of a
/// transferred course all drop out.
pub fn merge(
    as_plan: &AsPlan,
    bs_plan: &BsPlan,
    equivalencies: &EquivalencyTable,
) -> CombinedPlan {
    let bs_codes = bs_plan.code_set();

    let mut rows = Vec::with_capacity(as_plan.courses.len() + bs_plan.courses.len());
    let mut consumed: BTreeSet<CourseCode> = BTreeSet::new();

    for course in &as_plan.courses {
        let hit = equivalencies
            .equivalents(&course.code)
            .iter()
            .find(|bs_code| bs_codes.contains(bs_code.as_str()));
        match hit {
            Some(bs_code) => {
                consumed.insert(bs_code.clone());
                rows.push(CombinedRow {
                    term: course.term.clone(),
                    source: Source::As,
                    matched: Some(true),
                    as_course: Some(course.code.clone()),
                    as_credits: Some(course.credits),
                    bs_course: Some(bs_code.clone()),
                    status: Status::Transferred,
                });
            }
            None => rows.push(CombinedRow {
                term: course.term.clone(),
                source: Source::As,
                matched: Some(false),
                as_course: Some(course.code.clone()),
                as_credits: Some(course.credits),
                bs_course: None,
                status: Status::NotTransferred,
            }),
        }
    }

    for course in &bs_plan.courses {
        if consumed.contains(&course.code) {
            continue;
        }
        rows.push(CombinedRow {
            term: course.term.clone(),
            source: Source::Bs,
            matched: None,
            as_course: None,
            as_credits: None,
            bs_course: Some(course.code.clone()),
            status: Status::ToComplete,
        });
    }

    rows.sort_by(|lhs, rhs| {
        lhs.term
            .cmp(&rhs.term)
            .then_with(|| lhs.source.cmp(&rhs.source))
    });

    CombinedPlan { rows }
}

/// Institution and plan tokens used to label combined output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanLabel {
    pub institution: String,
    pub plan: String,
}

impl PlanLabel {
    /// Infers a label from a plan file named like `AS_<institution>_<plan>`
    /// (or `BS_…`). Any other stem shape falls back to the sanitized stem and
    /// a generic plan name.
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let parts: Vec<&str> = stem.splitn(3, '_').collect();
        if parts.len() == 3 && matches!(parts[0].to_ascii_uppercase().as_str(), "AS" | "BS") {
            let plan: String = parts[2].chars().filter(|ch| !ch.is_whitespace()).collect();
            Self {
                institution: safe_token(parts[1]),
                plan,
            }
        } else {
            Self {
                institution: safe_token(stem),
                plan: "Plan".to_string(),
            }
        }
    }
}

/// Default workbook filename for a combined plan, derived from both labels.
pub fn output_filename(as_label: &PlanLabel, bs_label: &PlanLabel) -> String {
    format!(
        "combined_study_plan_AS_{}_{}__BS_{}_{}.xlsx",
        as_label.institution, as_label.plan, bs_label.institution, bs_label.plan
    )
}

/// Words too generic to identify an institution in a filename token.
const GENERIC_WORDS: [&str; 7] = [
    "university",
    "college",
    "community",
    "of",
    "the",
    "district",
    "cc",
];

/// Shortens an institution token to something filesystem-safe: word
/// characters only, generic words dropped, at most the first two words
/// concatenated.
fn safe_token(raw: &str) -> String {
    let cleaned = clean_text(raw);
    let spaced: String = cleaned
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { ' ' })
        .collect();
    let words: Vec<&str> = spaced.split_whitespace().collect();
    let kept: Vec<&str> = words
        .iter()
        .copied()
        .filter(|word| !GENERIC_WORDS.iter().any(|generic| word.eq_ignore_ascii_case(generic)))
        .collect();
    let chosen = if kept.is_empty() { words } else { kept };
    chosen.into_iter().take(2).collect()
}
