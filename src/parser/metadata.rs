//! Document-level metadata found anywhere in the full text.

use super::extract::{extract, Candidate};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Known form titles, most specific first.
static DOCUMENT_TYPES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            r"(?i)World\s*Trips?\b(?s:.{0,40}?)Claimant\s+Statement\s+and\s+Authori[sz]ation",
            "WorldTrips Claimant Statement and Authorization",
        ),
        (
            r"(?i)Claimant\s+Statement\s+and\s+Authori[sz]ation",
            "Claimant Statement and Authorization",
        ),
        (r"(?i)Travel\s+(?:Medical\s+)?Insurance\s+Claim\s+Form", "Travel Insurance Claim Form"),
    ]
    .into_iter()
    .map(|(pattern, title)| (Regex::new(pattern).expect("valid title regex"), title))
    .collect()
});

const ENVELOPE_ID: &str = r"[A-Z0-9]{8}-[A-Z0-9]{4}-[A-Z0-9]{4}-[A-Z0-9]{4}-[A-Z0-9]{12}";

static ENVELOPE_CANDIDATES: Lazy<Vec<Candidate>> = Lazy::new(|| {
    vec![
        Candidate::new(&format!(r"(?i)Envelope\s*ID\s*[:#]?\s*({})\b", ENVELOPE_ID)),
        Candidate::new(&format!(r"(?i)\b({})\b", ENVELOPE_ID)),
    ]
});

static PAGE_OF_TOTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bPage\s+\d{1,3}\s+of\s+(\d{1,3})\b").expect("valid regex"));

/// Metadata recognised in the document text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMetadata {
    /// Recognised form title
    pub document_type: Option<String>,
    /// 8-4-4-4-12 envelope identifier
    pub envelope_id: Option<String>,
    /// `M` of the first "Page N of M"
    pub declared_total_pages: Option<u32>,
}

/// Extract metadata from the full document text.
pub fn extract_metadata(full_text: &str) -> TextMetadata {
    let document_type = DOCUMENT_TYPES
        .iter()
        .find(|(pattern, _)| pattern.is_match(full_text))
        .map(|(_, title)| (*title).to_string());

    let envelope_id = extract(full_text, &ENVELOPE_CANDIDATES);

    let declared_total_pages = PAGE_OF_TOTAL
        .captures(full_text)
        .and_then(|caps| caps[1].parse().ok());

    debug!(
        "Metadata: type={:?} envelope={:?} declared_pages={:?}",
        document_type, envelope_id, declared_total_pages
    );

    TextMetadata {
        document_type,
        envelope_id,
        declared_total_pages,
    }
}
