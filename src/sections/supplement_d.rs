//! SUPPLEMENT D: authorization for disclosure of protected health
//! information.

use super::{SectionHandler, HEADER_NOISE};
use crate::model::{PagePayload, Section};
use crate::parser::extract::{Candidate, Cascade, FieldSchema, FieldSpec, NAME_PATTERN};
use once_cell::sync::Lazy;

const RELATIONSHIPS: &str =
    r"(?-i:Father|Mother|Son|Daughter|Spouse|Husband|Wife|Guardian|Parent|Self|Other)";

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new(vec![
        FieldSpec::cascade(
            "insured_name",
            Cascade::new()
                .labeled_value(
                    r"(?:Insured|Patient)(?:'|\u{2019})?s?[ \t]+(?:Full[ \t]+)?Name|Name[ \t]+of[ \t]+(?:Insured|Patient)",
                    NAME_PATTERN,
                )
                .rejecting(HEADER_NOISE),
        ),
        FieldSpec::cascade(
            "policy_certificate_number",
            Cascade::new().then(
                Candidate::labeled_value(
                    r"(?:Policy|Certificate)(?:[ \t]*(?:/|or)[ \t]*Certificate)?[ \t]*(?:Number|No\.?|#)",
                    r"[A-Z0-9][A-Z0-9\-]{5,}",
                )
                .min_digits(6),
            ),
        ),
        FieldSpec::cascade(
            "personal_representative_name",
            Cascade::new()
                .labeled_value(
                    r"(?:Personal[ \t]+)?Representative(?:'|\u{2019})?s?[ \t]+Name|Name[ \t]+of[ \t]+(?:Personal[ \t]+)?Representative",
                    NAME_PATTERN,
                )
                .pattern(&format!(r"\b{}[ \t]*({})", RELATIONSHIPS, NAME_PATTERN))
                .rejecting(HEADER_NOISE),
        ),
        FieldSpec::cascade(
            "personal_representative_relationship",
            Cascade::new()
                .labeled_value(
                    r"Relationship(?:[ \t]+to[ \t]+(?:the[ \t]+)?(?:Insured|Patient|Claimant))?",
                    RELATIONSHIPS,
                )
                .pattern(&format!(r"\b({})[ \t]*{}", RELATIONSHIPS, NAME_PATTERN)),
        ),
        FieldSpec::cascade(
            "authorization_expiration_date_mm_dd_yy",
            Cascade::new().labeled_date(r"Expir(?:es|ation)(?:[ \t]+Date)?"),
        ),
        FieldSpec::cascade(
            "signature_date_mm_dd_yy",
            Cascade::new().labeled_date(r"Date[ \t]+Signed|Signature(?:[^\n]{0,40}?Date)"),
        ),
    ])
});

/// Handler for SUPPLEMENT D.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplementDHandler;

impl SectionHandler for SupplementDHandler {
    fn section(&self) -> Section {
        Section::SupplementD
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
        SupplementDHandler.extract(text).form_fields.unwrap()
    }

    #[test]
    fn test_labeled_fields() {
        let fields = extract(
            "SUPPLEMENT D: AUTHORIZATION FORM (PHI DISCLOSURE)\n\
             Insured Name: Ilyas Malik\n\
             Policy/Certificate Number: 123456789\n\
             Personal Representative Name: Raheel Malik\n\
             Relationship to Insured: Father\n\
             This authorization expires on: 12/31/2024\n\
             Signature of Personal Representative Date: 09/05/2023",
        );
        assert_eq!(fields.value("insured_name"), Some("Ilyas Malik"));
        assert_eq!(fields.value("policy_certificate_number"), Some("123456789"));
        assert_eq!(fields.value("personal_representative_name"), Some("Raheel Malik"));
        assert_eq!(fields.value("personal_representative_relationship"), Some("Father"));
        assert_eq!(fields.value("authorization_expiration_date_mm_dd_yy"), Some("12/31/2024"));
        assert_eq!(fields.value("signature_date_mm_dd_yy"), Some("09/05/2023"));
    }

    #[test]
    fn test_relationship_glued_to_name() {
        let fields = extract("SUPPLEMENT D\nFatherRaheel Malik");
        assert_eq!(fields.value("personal_representative_name"), Some("Raheel Malik"));
        assert_eq!(fields.value("personal_representative_relationship"), Some("Father"));
    }
}
