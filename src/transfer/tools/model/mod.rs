use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Normalized course identifier, e.g. `"MATH 1342"`. Codes are cleaned and
/// uppercased on the way in so the compute stages can compare them directly;
/// the plain string representation keeps interoperability with the
/// spreadsheet cells they come from.
pub type CourseCode = String;

/// Cleans a raw cell string: non-breaking spaces become plain spaces, em and
/// en dashes become hyphens, whitespace runs collapse to a single space, and
/// the ends are trimmed.
pub fn clean_text(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        let ch = match ch {
            '\u{00A0}' | '\u{202F}' => ' ',
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        };
        if ch.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !cleaned.is_empty() {
                cleaned.push(' ');
            }
            pending_space = false;
            cleaned.push(ch);
        }
    }
    cleaned
}

/// Normalizes a raw course code. Returns `None` when nothing remains after
/// cleaning, which callers treat as "this row has no code".
pub fn normalize_code(raw: &str) -> Option<CourseCode> {
    let cleaned = clean_text(raw).to_uppercase();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Splits a semicolon-separated cell of course codes, normalizing each piece
/// and discarding empties.
pub fn split_codes(raw: &str) -> Vec<CourseCode> {
    raw.split(';').filter_map(normalize_code).collect()
}

/// Term a course is placed in. Plans either carry an explicit term column
/// (numeric position or a free-text label such as "Fall 1") or fall back to
/// the 1-based row position. Numeric terms order by value and sort ahead of
/// labels; labels order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Term {
    /// Numeric term position.
    Position(u32),
    /// Free-text term label.
    Label(String),
}

impl Term {
    /// Parses a cleaned string cell into a term. Integer text becomes a
    /// position; anything else is kept as a label. Empty cells parse to
    /// `None` so the caller can apply its positional fallback.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = clean_text(raw);
        if cleaned.is_empty() {
            return None;
        }
        match cleaned.parse::<u32>() {
            Ok(position) => Some(Self::Position(position)),
            Err(_) => Some(Self::Label(cleaned)),
        }
    }

    /// Converts a numeric cell into a term. Whole non-negative numbers become
    /// positions; anything else (fractional, negative) is kept as a label so
    /// no information is lost.
    pub fn from_number(value: f64) -> Self {
        if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
            Self::Position(value as u32)
        } else {
            Self::Label(value.to_string())
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Position(position) => write!(f, "{position}"),
            Term::Label(label) => write!(f, "{label}"),
        }
    }
}

/// Single course row from an AS plan worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AsCourse {
    /// Normalized course code.
    pub code: CourseCode,
    /// Credit hours; can be fractional.
    pub credits: f64,
    /// Term the course is scheduled in.
    pub term: Term,
}

/// One Associate-level plan of study.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsPlan {
    pub courses: Vec<AsCourse>,
}

impl AsPlan {
    /// Sum of the plan's credit hours.
    pub fn total_credits(&self) -> f64 {
        self.courses.iter().map(|course| course.credits).sum()
    }
}

/// Single course row from a BS plan worksheet. BS credits are not modelled:
/// no output consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct BsCourse {
    pub code: CourseCode,
    pub term: Term,
}

/// One Bachelor-level plan of study.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BsPlan {
    pub courses: Vec<BsCourse>,
}

impl BsPlan {
    /// Set of course codes offered by the plan, borrowed from the rows.
    pub fn code_set(&self) -> BTreeSet<&str> {
        self.courses.iter().map(|course| course.code.as_str()).collect()
    }
}

/// Mapping from an AS course code to the BS codes it may transfer as.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquivalencyTable {
    entries: HashMap<CourseCode, Vec<CourseCode>>,
}

impl EquivalencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records equivalents for an AS code. Repeated AS codes merge: the
    /// equivalents accumulate across rows, first-seen order, deduplicated.
    pub fn insert(&mut self, as_code: CourseCode, bs_codes: impl IntoIterator<Item = CourseCode>) {
        let equivalents = self.entries.entry(as_code).or_default();
        for code in bs_codes {
            if !equivalents.contains(&code) {
                equivalents.push(code);
            }
        }
    }

    /// Equivalent BS codes for an AS code, in the order the table listed
    /// them. Unknown codes yield an empty slice, never an error.
    pub fn equivalents(&self, as_code: &str) -> &[CourseCode] {
        self.entries.get(as_code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of AS codes with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
