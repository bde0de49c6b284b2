//! PART B: travel assistance and other claims.

use super::{SectionHandler, HEADER_NOISE};
use crate::model::{PagePayload, Section};
use crate::parser::extract::{Cascade, FieldSchema, FieldSpec};
use once_cell::sync::Lazy;

/// Checkbox options are only read below the PART B heading so the heading's
/// own "OTHER CLAIMS" is not taken for the "Other" option.
const PART_B_ANCHOR: &str =
    r"(?i)PART[ \t]*B[ \t]*[:.\-]?[ \t]*TRAVEL\s+ASSISTANCE\s+AND\s+OTHER\s+CLAIMS|(?m:^)[ \t]*PART[ \t]*B\b";

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new(vec![
        FieldSpec::checkbox("1b_applying_for_travel_delay", r"(?i)Travel\s+Delay").after(PART_B_ANCHOR),
        FieldSpec::checkbox(
            "1b_applying_for_lost_checked_luggage",
            r"(?i)Lost(?:\s+or\s+Delayed)?\s+(?:Checked\s+)?(?:Luggage|Baggage)",
        )
        .after(PART_B_ANCHOR),
        FieldSpec::checkbox("1b_applying_for_trip_interruption", r"(?i)Trip\s+Interruption")
            .after(PART_B_ANCHOR),
        FieldSpec::checkbox(
            "1b_applying_for_emergency_quarantine_covid_19",
            r"(?i)(?:Emergency\s+)?Quarantine(?:[^\n]{0,20}?COVID[\s\-]*19)?|COVID[\s\-]*19",
        )
        .after(PART_B_ANCHOR),
        FieldSpec::checkbox("1b_applying_for_other", r"(?i)\bOther\b(?:[ \t]*\(specify\))?")
            .after(PART_B_ANCHOR),
        FieldSpec::cascade(
            "2b_incident_details",
            Cascade::new()
                .labeled(
                    r"(?:2B\.?[ \t]*)?(?:Please[ \t]+)?(?:Describe|Details[ \t]+of|Explain)[ \t]+(?:the[ \t]+|your[ \t]+)?(?:incident|claim|loss)(?:[ \t]+in[ \t]+detail)?",
                )
                .rejecting(HEADER_NOISE),
        ),
    ])
});

/// Handler for PART B.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelClaimsHandler;

impl SectionHandler for TravelClaimsHandler {
    fn section(&self) -> Section {
        Section::TravelClaims
    }

    fn output_keys(&self) -> Vec<&'static str> {
        SCHEMA.keys()
    }

    fn extract(&self, page_text: &str) -> PagePayload {
        PagePayload::fields(SCHEMA.extract(page_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> crate::model::FieldMap {
        TravelClaimsHandler.extract(text).form_fields.unwrap()
    }

    #[test]
    fn test_checkboxes() {
        let fields = extract(
            "PART B: TRAVEL ASSISTANCE AND OTHER CLAIMS\n\
             1B. What are you applying for?\n\
             X Travel Delay\n\
             Lost Checked Luggage\n\
             Trip Interruption\n\
             Emergency Quarantine (COVID-19)\n\
             Other\n\
             2B. Describe the incident: Flight cancelled due to storm",
        );
        assert_eq!(fields.value("1b_applying_for_travel_delay"), Some("Yes"));
        assert_eq!(fields.value("1b_applying_for_lost_checked_luggage"), Some("No"));
        assert_eq!(fields.value("1b_applying_for_trip_interruption"), Some("No"));
        assert_eq!(fields.value("1b_applying_for_emergency_quarantine_covid_19"), Some("No"));
        assert_eq!(fields.value("1b_applying_for_other"), Some("No"));
        assert_eq!(fields.value("2b_incident_details"), Some("Flight cancelled due to storm"));
    }

    #[test]
    fn test_incident_details_with_numbered_sentences() {
        let fields = extract(
            "PART B: TRAVEL ASSISTANCE AND OTHER CLAIMS\n\
             2B. Describe the incident: Delayed 2. Missed connection",
        );
        assert_eq!(fields.value("2b_incident_details"), Some("Delayed 2. Missed connection"));
    }

    #[test]
    fn test_heading_alone_reports_nothing() {
        let fields = extract("PART B: TRAVEL ASSISTANCE AND OTHER CLAIMS");
        assert_eq!(fields.present_count(), 0);
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn test_no_heading_no_checkboxes() {
        let fields = extract("X Travel Delay");
        assert_eq!(fields.value("1b_applying_for_travel_delay"), None);
    }
}
