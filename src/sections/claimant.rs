//! PART A: claimant information, including the continuation page with the
//! student, employment and other-insurance questions.

use super::{SectionHandler, HEADER_NOISE, HEADER_POSTAL_CODES};
use crate::model::{PagePayload, Section};
use crate::parser::extract::{
    Candidate, Cascade, FieldSchema, FieldSpec, EMAIL_PATTERN, NAME_PATTERN, PHONE_PATTERN,
    POSTAL_PATTERN,
};
use once_cell::sync::Lazy;

/// Street address such as `12 Main Street`, case-sensitive.
pub(crate) const STREET_PATTERN: &str = r"(?-i:\b(\d{1,6}[ \t]+(?:[A-Z][a-z]+[ \t]+){1,4}(?:Avenue|Ave|Street|St|Road|Rd|Drive|Dr|Lane|Ln|Boulevard|Blvd|Court|Ct|Way|Place|Pl|Terrace|Circle)\b\.?))";

const SCHOOL_ANCHOR: &str = r"(?i)Name\s+of\s+School";

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new(vec![
        FieldSpec::cascade(
            "1a_claimant_full_name",
            Cascade::new()
                .labeled_value(
                    r"(?:1A\.?[ \t]*)?Claimant(?:'|\u{2019})?s?[ \t]+(?:Full[ \t]+)?Name",
                    NAME_PATTERN,
                )
                .labeled(r"(?:1A\.?[ \t]*)?Claimant(?:'|\u{2019})?s?[ \t]+Full[ \t]+Name")
                .rejecting(HEADER_NOISE)
                .then(
                    Candidate::new(&format!(
                        r"(?m)^[ \t]*({})[ \t]*\r?\n[ \t]*\d+[ \t]+[A-Z]",
                        NAME_PATTERN
                    ))
                    .reject(HEADER_NOISE),
                ),
        ),
        FieldSpec::cascade(
            "2a_gender",
            Cascade::new()
                .pattern(r"(?:^|[^A-Za-z])[Xx\u{2713}\u{2714}\u{2612}][ \t]*\]?[ \t]*(Male|Female)\b")
                .labeled_value(r"(?:2A\.?[ \t]*)?Gender", r"\b(?:fe)?male\b")
                .pattern(r"(?m)^[ \t]*(Male|Female)[ \t]*$"),
        ),
        FieldSpec::cascade(
            "3a_date_of_birth_mm_dd_yy",
            Cascade::new()
                .labeled_date(r"Date[ \t]+of[ \t]+Birth")
                .labeled_date(r"\bDOB\b"),
        ),
        FieldSpec::cascade(
            "4a_current_mailing_address",
            Cascade::new()
                .labeled(r"4A\.?[ \t]*(?:Current[ \t]+)?Mailing[ \t]+Address")
                .rejecting(HEADER_NOISE)
                .pattern(STREET_PATTERN),
        )
        .before(SCHOOL_ANCHOR),
        FieldSpec::cascade("5a_city", Cascade::new().labeled(r"5A\.?[ \t]*City")),
        FieldSpec::cascade(
            "6a_state",
            Cascade::new().labeled(r"6A\.?[ \t]*State(?:[ \t]*/[ \t]*Province)?"),
        ),
        FieldSpec::cascade(
            "7a_postal_code",
            Cascade::new()
                .labeled_value(r"7A\.?[ \t]*(?:Postal|Zip)[ \t]*Code", POSTAL_PATTERN)
                .rejecting(HEADER_POSTAL_CODES),
        ),
        FieldSpec::cascade("8a_country", Cascade::new().labeled(r"8A\.?[ \t]*Country")),
        FieldSpec::cascade(
            "9a_primary_telephone",
            Cascade::new().then(
                Candidate::labeled_value(r"(?:9A\.?[ \t]*)?Primary[ \t]+(?:Tele)?phone", PHONE_PATTERN)
                    .min_digits(7),
            ),
        ),
        FieldSpec::cascade(
            "10a_secondary_telephone",
            Cascade::new().then(
                Candidate::labeled_value(r"(?:10A\.?[ \t]*)?Secondary[ \t]+(?:Tele)?phone", PHONE_PATTERN)
                    .min_digits(7),
            ),
        ),
        FieldSpec::cascade(
            "11a_email_address",
            Cascade::new()
                .labeled_value(r"(?:11A\.?[ \t]*)?E-?mail(?:[ \t]+Address)?", EMAIL_PATTERN)
                .pattern(&format!(r"(?:^|[\s:;,])({})", EMAIL_PATTERN)),
        ),
        FieldSpec::cascade(
            "12a_policy_or_certificate_number",
            Cascade::new().then(
                Candidate::labeled_value(
                    r"(?:12A\.?[ \t]*)?(?:Policy|Certificate)(?:[ \t]*(?:/|or)[ \t]*Certificate)?[ \t]*(?:Number|No\.?|#)",
                    r"[A-Z0-9][A-Z0-9\-]{5,}",
                )
                .min_digits(6),
            ),
        ),
        FieldSpec::cascade("13a_citizenship", Cascade::new().labeled(r"13A\.?[ \t]*Citizenship")),
        FieldSpec::cascade(
            "14a_home_country",
            Cascade::new().labeled(r"14A\.?[ \t]*Home[ \t]+Country"),
        ),
        FieldSpec::cascade(
            "15a_countries_visited",
            Cascade::new()
                .labeled(r"15A\.?[ \t]*Countries[ \t]+Visited(?:[ \t]*\([^)\n]*\))?")
                .rejecting(HEADER_NOISE),
        ),
        FieldSpec::yes_no("16a_full_time_student", r"(?i)full[\s\-]*time\s+student"),
        FieldSpec::cascade(
            "16a_school_name",
            Cascade::new()
                .labeled(SCHOOL_ANCHOR)
                .rejecting(&["of school"])
                .pattern(r"(?-i:\b((?:[A-Z][A-Za-z.'\-]*[ \t]+){1,4}(?:High[ \t]+School|University|College|Academy|Institute)))\b"),
        ),
        FieldSpec::cascade(
            "16a_school_address",
            Cascade::new()
                .labeled(r"Address[ \t]+of[ \t]+School")
                .rejecting(&["of school", "city"])
                .pattern(STREET_PATTERN),
        )
        .after(SCHOOL_ANCHOR),
        FieldSpec::cascade(
            "16a_school_city",
            Cascade::new().labeled(r"\bCity").rejecting(&["state", "postal", "country"]),
        )
        .after(SCHOOL_ANCHOR),
        FieldSpec::cascade(
            "16a_school_state",
            Cascade::new()
                .labeled(r"\bState(?:[ \t]*/[ \t]*Province)?")
                .rejecting(&["postal", "country", "zip"]),
        )
        .after(SCHOOL_ANCHOR),
        FieldSpec::cascade(
            "16a_school_postal_code",
            Cascade::new()
                .labeled_value(r"(?:Postal|Zip)[ \t]*Code", POSTAL_PATTERN)
                .rejecting(HEADER_POSTAL_CODES),
        )
        .after(SCHOOL_ANCHOR),
        FieldSpec::cascade(
            "16a_school_country",
            Cascade::new().labeled(r"\bCountry").rejecting(&["employed"]),
        )
        .after(SCHOOL_ANCHOR),
        FieldSpec::yes_no("17a_employed", r"(?i)\b(?:are\s+you\s+)?employed\b"),
        FieldSpec::yes_no(
            "18a_other_insurance_coverage",
            r"(?i)other\s+(?:health\s+|medical\s+)?insurance",
        ),
    ])
});

/// Handler for PART A.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimantInfoHandler;

impl SectionHandler for ClaimantInfoHandler {
    fn section(&self) -> Section {
        Section::ClaimantInfo
    }

    fn output_keys(&self) -> Vec<&'static str> {
        SCHEMA.keys()
    }

    fn extract(&self, page_text: &str) -> PagePayload {
        PagePayload::fields(SCHEMA.extract(page_text))
    }
}
