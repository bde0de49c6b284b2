//! Section classification by heading patterns.

use crate::model::Section;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

struct Heading {
    section: Section,
    patterns: Vec<Regex>,
}

impl Heading {
    fn new(section: Section, patterns: &[&str]) -> Self {
        Self {
            section,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("valid heading regex"))
                .collect(),
        }
    }

    /// Offset of the earliest match of any pattern.
    fn first_match(&self, text: &str) -> Option<usize> {
        self.patterns.iter().filter_map(|p| p.find(text)).map(|m| m.start()).min()
    }
}

/// Heading table. Supplements precede the generic PART headings, and full
/// titles may appear anywhere while bare "PART X" / "SUPPLEMENT X" must
/// start a line.
static HEADINGS: Lazy<Vec<Heading>> = Lazy::new(|| {
    vec![
        Heading::new(
            Section::SupplementA,
            &[
                r"(?i)NON[\s-]*U\.?\s?S\.?\s+CLAIM\s+ITEMI[ZS]ATION",
                r"(?im)^[ \t]*SUPPLEMENT[ \t]*A\b",
            ],
        ),
        Heading::new(
            Section::SupplementB,
            &[r"(?i)SUPPLEMENT[ \t]*B[ \t]*[:.\-\u{2013}\u{2014}]?[ \t]*ILLNESS", r"(?im)^[ \t]*SUPPLEMENT[ \t]*B\b"],
        ),
        Heading::new(
            Section::SupplementC,
            &[
                r"(?i)PAYMENT\s+AUTHORI[ZS]ATION\s+AGREEMENT",
                r"(?i)THIRD\s+PARTY\s+PAYMENT\s+FORM",
                r"(?im)^[ \t]*SUPPLEMENT[ \t]*C\b",
            ],
        ),
        Heading::new(
            Section::SupplementD,
            &[r"(?i)PHI\s+DISCLOSURE", r"(?im)^[ \t]*SUPPLEMENT[ \t]*D\b"],
        ),
        Heading::new(
            Section::ClaimantInfo,
            &[
                r"(?i)\bPART[ \t]*A[ \t]*[:.\-]?[ \t]*CLAIMANT\s+INFORMATION",
                r"(?im)^[ \t]*PART[ \t]*A\b",
                // First field of the form, for pages whose heading was lost
                r"(?i)\b1A\.[ \t]*Claimant(?:'|\u{2019})?s?[ \t]+(?:Full[ \t]+)?Name",
            ],
        ),
        Heading::new(
            Section::TravelClaims,
            &[
                r"(?i)\bPART[ \t]*B[ \t]*[:.\-]?[ \t]*TRAVEL\s+ASSISTANCE",
                r"(?im)^[ \t]*PART[ \t]*B\b",
            ],
        ),
        Heading::new(
            Section::MedicalInfo,
            &[r"(?i)\bPART[ \t]*C[ \t]*[:.\-]?[ \t]*MEDICAL\s+INFORMATION", r"(?im)^[ \t]*PART[ \t]*C\b"],
        ),
        Heading::new(
            Section::Signatures,
            &[
                r"(?i)\bPART[ \t]*D[ \t]*[:.\-]?[ \t]*MEDICAL\s+RECORD\s+AUTHORI[ZS]ATION",
                r"(?im)^[ \t]*PART[ \t]*D\b",
            ],
        ),
    ]
});

/// Classify a page by the section headings it contains.
///
/// Returns every recognised section ordered by where its heading first
/// appears; two or more entries mean a boundary page. An empty result means
/// the page is unclassified.
pub fn classify(page_text: &str) -> Vec<Section> {
    let mut hits: Vec<(usize, Section)> = HEADINGS
        .iter()
        .filter_map(|heading| heading.first_match(page_text).map(|at| (at, heading.section)))
        .collect();

    // Stable sort keeps table order for headings at the same offset.
    hits.sort_by_key(|(at, _)| *at);

    let sections: Vec<Section> = hits.into_iter().map(|(_, section)| section).collect();
    debug!("Classified page as {}", Section::joined_label(&sections));
    sections
}
