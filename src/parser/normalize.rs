//! Value normalization.
//!
//! Every captured substring passes through [`normalize`] before it reaches a
//! field map, so "absent" always means "nothing usable was captured".

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters stripped from the ends of a value as label remnants.
const STRAY_PUNCTUATION: &[char] = &[
    ':', ';', ',', '.', '_', '|', '-', '\u{2013}', '\u{2014}', '=', '*', '~', '\u{2022}', '\u{00B7}',
];

/// Pattern for a numeric date token as it appears in OCR text.
pub const DATE_PATTERN: &str =
    r"\d{1,2}[ \t]?[/.\-][ \t]?\d{1,2}[ \t]?[/.\-][ \t]?(?:\d{4}|\d{2})";

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s*[/.\-]\s*(\d{1,2})\s*[/.\-]\s*(\d{4}|\d{2})$").expect("valid regex")
});
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid regex"));

/// Two-digit years below this pivot are in the 2000s.
const YEAR_PIVOT: i32 = 70;

/// Clean a raw captured substring.
///
/// Collapses whitespace runs (line breaks included) to single spaces, strips
/// stray punctuation from both ends and maps empty or punctuation-only input
/// to `None`. Idempotent.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let collapsed = raw?.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed =
        collapsed.trim_matches(|c: char| c.is_whitespace() || STRAY_PUNCTUATION.contains(&c));

    if trimmed.chars().any(char::is_alphanumeric) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// [`normalize`] for a value that is known to be present.
pub fn normalize_str(raw: &str) -> Option<String> {
    normalize(Some(raw))
}

/// Parse a numeric date and render it as `MM/DD/YYYY`.
///
/// Accepts month/day/year with `/`, `.` or `-` separators and 2- or 4-digit
/// years, plus ISO `YYYY-MM-DD`. Impossible calendar dates yield `None`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let compact: String = raw.split_whitespace().collect();

    let (year, month, day) = if let Some(caps) = ISO_DATE.captures(&compact) {
        (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
    } else {
        let caps = NUMERIC_DATE.captures(&compact)?;
        (expand_year(&caps[3])?, caps[1].parse().ok()?, caps[2].parse().ok()?)
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%m/%d/%Y").to_string())
}

fn expand_year(digits: &str) -> Option<i32> {
    let year: i32 = digits.parse().ok()?;
    if digits.len() == 4 {
        Some(year)
    } else if year < YEAR_PIVOT {
        Some(2000 + year)
    } else {
        Some(1900 + year)
    }
}
