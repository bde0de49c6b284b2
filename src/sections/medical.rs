//! PART C: medical information.

use super::{SectionHandler, HEADER_NOISE};
use crate::model::{PagePayload, Section};
use crate::parser::extract::{Candidate, Cascade, FieldSchema, FieldSpec};
use once_cell::sync::Lazy;

/// Month-name date such as `July 8th` or `Sept. 3, 2023`, case-sensitive.
const MONTH_DATE_PATTERN: &str = r"(?-i:(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sept?(?:ember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?[ \t]+\d{1,2}(?:st|nd|rd|th|h)?(?:,?[ \t]+\d{4})?)";

const ONSET_LABEL: &str = r"(?:1C\.?[ \t]*)?(?:Onset[ \t]+of[ \t]+(?:illness|symptoms)|Date(?:[ \t]*(?:/|and)[ \t]*Time)?[ \t]+of[ \t]+(?:injury|onset))";

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new(vec![
        FieldSpec::cascade(
            "1c_onset_of_illness_or_date_time_of_injury",
            Cascade::new()
                .labeled_date(ONSET_LABEL)
                .labeled_value(ONSET_LABEL, MONTH_DATE_PATTERN)
                .then(Candidate::new(&format!(r"(?:^|[^A-Za-z])[Xx]?({})\b", MONTH_DATE_PATTERN))),
        ),
        FieldSpec::cascade(
            "1c_accident_location_if_any",
            Cascade::new()
                .labeled(r"(?:Accident[ \t]+)?Location(?:[ \t]+of[ \t]+(?:the[ \t]+)?accident)?(?:[ \t]*\(if[ \t]+any\))?")
                .rejecting(HEADER_NOISE),
        ),
        FieldSpec::cascade(
            "1c_symptoms_description",
            Cascade::new()
                .labeled(r"(?:Please[ \t]+)?(?:Describe|Description[ \t]+of)[ \t]+(?:the[ \t]+|your[ \t]+)?symptoms?(?:[ \t]+and[ \t]+diagnosis)?")
                .labeled(r"\bSymptoms")
                .rejecting(HEADER_NOISE),
        ),
        FieldSpec::yes_no(
            "2c_had_same_illness_or_injury_before",
            r"(?i)(?:same|similar)\s+(?:illness|injury|condition)",
        ),
        FieldSpec::yes_no("3c_motorized_vehicle_accident", r"(?i)motori[sz]ed\s+vehicle"),
        FieldSpec::yes_no(
            "4c_any_conditions_or_medication_last_2_years",
            r"(?i)(?:past|last)\s+(?:2|two)\s+years",
        ),
        FieldSpec::yes_no(
            "5c_incident_related_to_employment",
            r"(?i)related\s+to\s+(?:your\s+)?(?:employment|work|job)",
        ),
    ])
});

/// Handler for PART C.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedicalInfoHandler;

impl SectionHandler for MedicalInfoHandler {
    fn section(&self) -> Section {
        Section::MedicalInfo
    }

    fn output_keys(&self) -> Vec<&'static str> {
        SCHEMA.keys()
    }

    fn extract(&self, page_text: &str) -> PagePayload {
        PagePayload::fields(SCHEMA.extract(page_text))
    }
}
