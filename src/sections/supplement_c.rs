//! SUPPLEMENT C: payment authorization agreement, including the third party
//! payment form that follows it.

use super::claimant::STREET_PATTERN;
use super::{SectionHandler, HEADER_NOISE, HEADER_POSTAL_CODES};
use crate::model::{PagePayload, Section};
use crate::parser::extract::{
    Candidate, Cascade, FieldSchema, FieldSpec, EMAIL_PATTERN, NAME_PATTERN, POSTAL_PATTERN,
};
use crate::parser::DATE_PATTERN;
use once_cell::sync::Lazy;

const THIRD_PARTY: &str = r"(?i)THIRD\s+PARTY\s+PAYMENT";

/// Optional "3." style item number in front of a label.
const ITEM: &str = r"(?:\b\d{1,2}\.[ \t]*)?";

static FIELDS: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new(vec![
        FieldSpec::cascade(
            "beneficiary_name",
            Cascade::new()
                .labeled_value(&format!(r"{}(?:Beneficiary|Payee)(?:'|\u{{2019}})?s?[ \t]+Name", ITEM), NAME_PATTERN)
                .pattern(&format!(r"\b\d{{5}}({})", NAME_PATTERN))
                .rejecting(HEADER_NOISE),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "beneficiary_email",
            Cascade::new()
                .labeled_value(&format!(r"{}(?:Beneficiary[ \t]+)?E-?mail(?:[ \t]+Address)?", ITEM), EMAIL_PATTERN)
                .pattern(&format!(r"({})", EMAIL_PATTERN)),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "beneficiary_address",
            Cascade::new()
                .labeled_item(&format!(r"{}(?:Beneficiary[ \t]+)?(?:Mailing[ \t]+)?Address", ITEM))
                .rejecting(&["city", "state"])
                .rejecting(HEADER_NOISE)
                .pattern(STREET_PATTERN),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "beneficiary_city",
            Cascade::new()
                .labeled_item(&format!(r"{}(?:Beneficiary[ \t]+)?\bCity", ITEM))
                .rejecting(&["state", "postal", "bank"])
                .rejecting(HEADER_NOISE),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "beneficiary_state",
            Cascade::new()
                .labeled_item(&format!(r"{}(?:Beneficiary[ \t]+)?\bState(?:[ \t]*/[ \t]*Province)?", ITEM))
                .rejecting(&["postal", "zip", "country"]),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "beneficiary_postal_code",
            Cascade::new()
                .labeled_value(r"(?:Postal|Zip)[ \t]*Code", POSTAL_PATTERN)
                .rejecting(HEADER_POSTAL_CODES),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "beneficiary_country",
            Cascade::new()
                .labeled_item(&format!(r"{}(?:Beneficiary[ \t]+)?\bCountry", ITEM))
                .rejecting(&["bank", "swift"]),
        )
        .before(THIRD_PARTY),
        FieldSpec::choice(
            "payment_type",
            &[
                ("Check", r"(?i)\bCheck\b"),
                ("Wire", r"(?i)\bWire(?:\s+Transfer)?\b"),
                ("ACH", r"(?i)\bACH\b|Direct\s+Deposit"),
            ],
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "bank_name",
            Cascade::new().labeled_item(&format!(r"{}Bank[ \t]+Name", ITEM)).rejecting(&["bank"]),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "account_number",
            Cascade::new().then(
                Candidate::labeled_value(
                    &format!(r"{}(?:Bank[ \t]+)?Account[ \t]+(?:Number|No\.?|#)", ITEM),
                    r"[A-Z0-9][A-Z0-9\-]{3,}",
                )
                .min_digits(4),
            ),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "routing_or_swift_code",
            Cascade::new().then(
                Candidate::labeled_value(
                    &format!(r"{}(?:Routing|ABA|SWIFT|BIC)(?:[ \t]*/[ \t]*(?:SWIFT|BIC|IBAN))?(?:[ \t]+(?:Number|Code|No\.?))?", ITEM),
                    r"[A-Z0-9]{6,}",
                )
                .min_digits(2),
            ),
        )
        .before(THIRD_PARTY),
        FieldSpec::cascade(
            "third_party_name",
            Cascade::new()
                .labeled_value(
                    &format!(r"{}(?:Third[ \t]+Party|Payee|Provider|Facility)(?:'|\u{{2019}})?s?[ \t]+Name", ITEM),
                    NAME_PATTERN,
                )
                .rejecting(HEADER_NOISE),
        )
        .after(THIRD_PARTY),
        FieldSpec::cascade(
            "third_party_address",
            Cascade::new()
                .labeled_item(&format!(r"{}(?:Mailing[ \t]+)?Address", ITEM))
                .rejecting(&["city", "state"])
                .pattern(STREET_PATTERN),
        )
        .after(THIRD_PARTY),
        FieldSpec::cascade(
            "third_party_city",
            Cascade::new().labeled_item(&format!(r"{}\bCity", ITEM)).rejecting(&["state", "postal"]),
        )
        .after(THIRD_PARTY),
        FieldSpec::cascade(
            "third_party_state",
            Cascade::new()
                .labeled_item(&format!(r"{}\bState(?:[ \t]*/[ \t]*Province)?", ITEM))
                .rejecting(&["postal", "zip", "country"]),
        )
        .after(THIRD_PARTY),
        FieldSpec::cascade(
            "third_party_postal_code",
            Cascade::new()
                .labeled_value(r"(?:Postal|Zip)[ \t]*Code", POSTAL_PATTERN)
                .rejecting(HEADER_POSTAL_CODES),
        )
        .after(THIRD_PARTY),
        FieldSpec::cascade(
            "third_party_country",
            Cascade::new().labeled_item(&format!(r"{}\bCountry", ITEM)),
        )
        .after(THIRD_PARTY),
    ])
});

static SIGNATURES: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new(vec![
        FieldSpec::cascade(
            "insured_signature_date_mm_dd_yy",
            Cascade::new()
                .labeled_date(r"(?:Insured(?:'|\u{2019})?s?[ \t]+Signature|Signature[ \t]+of[ \t]+Insured)(?:[^\n]{0,20}?Date)?")
                .then(Candidate::new(&format!(r"\b({})[ \t]*{}", DATE_PATTERN, NAME_PATTERN)).date()),
        ),
        FieldSpec::cascade(
            "printed_name_of_insured",
            Cascade::new()
                .labeled_value(r"Print(?:ed)?[ \t]+Name(?:[ \t]+of[ \t]+Insured)?", NAME_PATTERN)
                .pattern(&format!(r"{}[ \t]*({})", DATE_PATTERN, NAME_PATTERN))
                .pattern(&format!(r"\d{{4}}({})", NAME_PATTERN))
                .rejecting(HEADER_NOISE)
                .rejecting(&["domestic", "signature"]),
        ),
    ])
});

/// Handler for SUPPLEMENT C.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplementCHandler;

impl SectionHandler for SupplementCHandler {
    fn section(&self) -> Section {
        Section::SupplementC
    }

    fn output_keys(&self) -> Vec<&'static str> {
        FIELDS.keys().into_iter().chain(SIGNATURES.keys()).collect()
    }

    fn extract(&self, page_text: &str) -> PagePayload {
        PagePayload {
            form_fields: Some(FIELDS.extract(page_text)),
            signatures: Some(SIGNATURES.extract(page_text)),
            tables: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beneficiary_and_payment() {
        let payload = SupplementCHandler.extract(
            "SUPPLEMENT C: PAYMENT AUTHORIZATION AGREEMENT FORM\n\
             1. Beneficiary Name: Raheel Malik\n\
             2. Address: 69 Sylvester Avenue\n\
             3. Beneficiary Email Address: razmalik@example.com\n\
             4. City: Winchester\n\
             5. State: MA\n\
             6. Postal Code: 01890\n\
             7. Country: USA\n\
             Payment method: X Check  Wire Transfer  ACH\n\
             8. Bank Name:\n",
        );
        let fields = payload.form_fields.unwrap();
        assert_eq!(fields.value("beneficiary_name"), Some("Raheel Malik"));
        assert_eq!(fields.value("beneficiary_address"), Some("69 Sylvester Avenue"));
        assert_eq!(fields.value("beneficiary_email"), Some("razmalik@example.com"));
        assert_eq!(fields.value("beneficiary_city"), Some("Winchester"));
        assert_eq!(fields.value("beneficiary_state"), Some("MA"));
        assert_eq!(fields.value("beneficiary_postal_code"), Some("01890"));
        assert_eq!(fields.value("beneficiary_country"), Some("USA"));
        assert_eq!(fields.value("payment_type"), Some("Check"));
        assert_eq!(fields.value("bank_name"), None);
        assert_eq!(fields.value("third_party_name"), None);
    }

    #[test]
    fn test_third_party_block_is_separate() {
        let payload = SupplementCHandler.extract(
            "SUPPLEMENT C\nCity: Winchester\n\
             THIRD PARTY PAYMENT FORM\n\
             Provider Name: Memorial Clinic\n\
             Address: 12 Oak Street\n\
             City: Istanbul\n\
             Country: Turkey\n\
             9/5/2023 Ilyas Malik",
        );
        let fields = payload.form_fields.unwrap();
        assert_eq!(fields.value("beneficiary_city"), Some("Winchester"));
        assert_eq!(fields.value("third_party_name"), Some("Memorial Clinic"));
        assert_eq!(fields.value("third_party_address"), Some("12 Oak Street"));
        assert_eq!(fields.value("third_party_city"), Some("Istanbul"));
        assert_eq!(fields.value("third_party_country"), Some("Turkey"));

        let signatures = payload.signatures.unwrap();
        assert_eq!(signatures.value("insured_signature_date_mm_dd_yy"), Some("09/05/2023"));
        assert_eq!(signatures.value("printed_name_of_insured"), Some("Ilyas Malik"));
    }

    #[test]
    fn test_ambiguous_payment_type_absent() {
        let fields = SupplementCHandler.extract("X Check X Wire").form_fields.unwrap();
        assert_eq!(fields.value("payment_type"), None);
    }
}
