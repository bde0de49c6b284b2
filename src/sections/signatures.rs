//! PART D: medical record authorization signatures.

use super::{SectionHandler, HEADER_NOISE};
use crate::model::{PagePayload, Section};
use crate::parser::extract::{Candidate, Cascade, FieldSchema, FieldSpec, NAME_PATTERN};
use crate::parser::DATE_PATTERN;
use once_cell::sync::Lazy;

/// Words that look like a name in signature blocks but are not one.
const SIGNATURE_NOISE: &[&str] = &["signature", "date", "domestic", "insured", "claimant"];

fn first_date() -> Candidate {
    Candidate::new(&format!(r"\b({})", DATE_PATTERN)).date()
}

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new(vec![
        FieldSpec::cascade(
            "claimant_signature_date_mm_dd_yy",
            Cascade::new()
                .labeled_date(r"Claimant(?:'|\u{2019})?s?[ \t]+Signature(?:[^\n]{0,20}?Date)?")
                .then(first_date()),
        ),
        FieldSpec::cascade(
            "insured_signature_date_mm_dd_yy",
            Cascade::new()
                .labeled_date(r"(?:Insured(?:'|\u{2019})?s?[ \t]+Signature|Signature[ \t]+of[ \t]+Insured)(?:[^\n]{0,20}?Date)?")
                .then(first_date()),
        ),
        FieldSpec::cascade(
            "printed_name",
            Cascade::new()
                .labeled_value(r"Print(?:ed)?[ \t]+Name(?:[ \t]+of[ \t]+(?:Claimant|Insured))?", NAME_PATTERN)
                .pattern(&format!(r"\d{{4}}[ \t]*({})\b", NAME_PATTERN))
                .rejecting(HEADER_NOISE)
                .rejecting(SIGNATURE_NOISE),
        ),
    ])
});

/// Handler for PART D. Produces a signature block, not form fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignaturesHandler;

impl SectionHandler for SignaturesHandler {
    fn section(&self) -> Section {
        Section::Signatures
    }

    fn output_keys(&self) -> Vec<&'static str> {
        SCHEMA.keys()
    }

    fn extract(&self, page_text: &str) -> PagePayload {
        PagePayload::signatures(SCHEMA.extract(page_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_signatures() {
        let payload = SignaturesHandler.extract(
            "PART D: MEDICAL RECORD AUTHORIZATION\n\
             Claimant's Signature: ________ Date: 09/05/23\n\
             Insured's Signature: ________ Date: 9/6/2023\n\
             Printed Name: Ilyas Malik",
        );
        assert!(payload.form_fields.is_none());
        let sig = payload.signatures.unwrap();
        assert_eq!(sig.value("claimant_signature_date_mm_dd_yy"), Some("09/05/2023"));
        assert_eq!(sig.value("insured_signature_date_mm_dd_yy"), Some("09/06/2023"));
        assert_eq!(sig.value("printed_name"), Some("Ilyas Malik"));
    }

    #[test]
    fn test_unlabeled_date_and_glued_name() {
        let payload = SignaturesHandler.extract("PART D\nsigned 9/5/2023Ilyas Malik");
        let sig = payload.signatures.unwrap();
        assert_eq!(sig.value("claimant_signature_date_mm_dd_yy"), Some("09/05/2023"));
        assert_eq!(sig.value("insured_signature_date_mm_dd_yy"), Some("09/05/2023"));
        assert_eq!(sig.value("printed_name"), Some("Ilyas Malik"));
    }

    #[test]
    fn test_empty_signature_block() {
        let sig = SignaturesHandler.extract("PART D").signatures.unwrap();
        assert_eq!(sig.len(), 3);
        assert_eq!(sig.present_count(), 0);
    }
}
