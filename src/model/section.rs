//! Known form sections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label for pages that match no known section heading.
pub const UNCLASSIFIED: &str = "UNCLASSIFIED";

/// A named logical division of the claim form with its own field schema.
///
/// The serialized label is part of the output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// PART A: claimant identity, contact and student/employment details
    #[serde(rename = "PART A: CLAIMANT INFORMATION")]
    ClaimantInfo,
    /// PART B: travel assistance and other (non-medical) claims
    #[serde(rename = "PART B: TRAVEL ASSISTANCE AND OTHER CLAIMS")]
    TravelClaims,
    /// PART C: illness or injury details
    #[serde(rename = "PART C: MEDICAL INFORMATION")]
    MedicalInfo,
    /// PART D: authorization signatures
    #[serde(rename = "PART D: MEDICAL RECORD AUTHORIZATION")]
    Signatures,
    /// SUPPLEMENT A: itemized non-U.S. medical charges
    #[serde(rename = "SUPPLEMENT A: NON-U.S. CLAIM ITEMIZATION FORM")]
    SupplementA,
    /// SUPPLEMENT B: illness or injury treatment itemization
    #[serde(rename = "SUPPLEMENT B: ILLNESS OR INJURY")]
    SupplementB,
    /// SUPPLEMENT C: payment authorization and third party payment
    #[serde(rename = "SUPPLEMENT C: PAYMENT AUTHORIZATION AGREEMENT FORM")]
    SupplementC,
    /// SUPPLEMENT D: PHI disclosure authorization
    #[serde(rename = "SUPPLEMENT D: AUTHORIZATION FORM (PHI DISCLOSURE)")]
    SupplementD,
}

impl Section {
    /// Every section, in form order.
    pub const ALL: [Section; 8] = [
        Section::ClaimantInfo,
        Section::TravelClaims,
        Section::MedicalInfo,
        Section::Signatures,
        Section::SupplementA,
        Section::SupplementB,
        Section::SupplementC,
        Section::SupplementD,
    ];

    /// The output label for this section.
    pub fn label(self) -> &'static str {
        match self {
            Section::ClaimantInfo => "PART A: CLAIMANT INFORMATION",
            Section::TravelClaims => "PART B: TRAVEL ASSISTANCE AND OTHER CLAIMS",
            Section::MedicalInfo => "PART C: MEDICAL INFORMATION",
            Section::Signatures => "PART D: MEDICAL RECORD AUTHORIZATION",
            Section::SupplementA => "SUPPLEMENT A: NON-U.S. CLAIM ITEMIZATION FORM",
            Section::SupplementB => "SUPPLEMENT B: ILLNESS OR INJURY",
            Section::SupplementC => "SUPPLEMENT C: PAYMENT AUTHORIZATION AGREEMENT FORM",
            Section::SupplementD => "SUPPLEMENT D: AUTHORIZATION FORM (PHI DISCLOSURE)",
        }
    }

    /// Look a section up by its output label.
    pub fn from_label(label: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Check if this is one of the lettered supplements.
    pub fn is_supplement(self) -> bool {
        matches!(
            self,
            Section::SupplementA | Section::SupplementB | Section::SupplementC | Section::SupplementD
        )
    }

    /// Join labels for a (possibly boundary) page, or [`UNCLASSIFIED`].
    pub fn joined_label(sections: &[Section]) -> String {
        if sections.is_empty() {
            return UNCLASSIFIED.to_string();
        }
        sections
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
