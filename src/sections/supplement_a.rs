//! SUPPLEMENT A: non-U.S. claim itemization.
//!
//! Each charge starts on a line beginning with its date of service; the
//! lines up to the next such date belong to the same charge.

use super::SectionHandler;
use crate::model::{PagePayload, Section, TableMap};
use crate::parser::extract::{Candidate, Cascade, FieldSchema, FieldSpec, AMOUNT_PATTERN};
use crate::parser::DATE_PATTERN;
use crate::parser::table::RowExtractor;
use once_cell::sync::Lazy;

/// Output table name.
pub const TABLE_NAME: &str = "supplement_a_items";

/// Care provider name ending in a facility word, case-sensitive.
pub(crate) const PROVIDER_PATTERN: &str = r"(?-i:\b((?:[A-Z][A-Za-z&'.\-]*[ \t\r\n]+){1,4}(?:Hospital|Clinic|Medical[ \t]+Cent(?:er|re)|Health[ \t]+Cent(?:er|re)|Pharmacy|Laboratory|Hastanesi)))\b";

/// Common service descriptions when the column has no label.
pub(crate) const SERVICE_PATTERN: &str = r"(?i)\b((?:Examination|Consultation|Medication|Surgery|X-?ray|Laboratory|Lab[ \t]+tests?|Emergency[ \t]+room|Physiotherapy|Prescription|Treatment|Office[ \t]+visit)[^\n\d]*)";

const CURRENCY_PATTERN: &str = r"(?-i:\b((?:USD|EUR|GBP|TL|TRY|CAD|AUD|MXN|JPY|INR|CHF|CNY|AED)\b(?:[ \t]*\([^)\n]*\))?))";

/// Unlabeled amount with cents. It may not start inside a dotted number,
/// so the tail of a `07.09.23` date is never read as an amount.
pub(crate) const CENTS_AMOUNT_PATTERN: &str = r"(?:^|[^\d.])(\d[\d,]*\.\d{2,3})(?:[^\d.]|$)";

/// Table end: totals, signature block or the next supplement.
pub(crate) const TABLE_END: &str = r"(?im)\b(?:grand[ \t]+)?total(?:[ \t]+amount)?[ \t]*[:$]|claimant(?:'|\u{2019})?s?[ \t]+signature|^[ \t]*SUPPLEMENT[ \t]*[B-D]\b";

static ROWS: Lazy<RowExtractor> = Lazy::new(|| {
    let columns = FieldSchema::new(vec![
        FieldSpec::cascade(
            "date_of_service_mm_dd_yy",
            Cascade::new().then(Candidate::new(&format!(r"^\s*({})", DATE_PATTERN)).date()),
        ),
        FieldSpec::cascade(
            "provider",
            Cascade::new()
                .labeled(r"Provider(?:[ \t]+Name)?")
                .pattern(PROVIDER_PATTERN),
        ),
        FieldSpec::cascade("diagnosis", Cascade::new().labeled(r"Diagnosis")),
        FieldSpec::cascade(
            "description_of_services",
            Cascade::new()
                .labeled(r"Description(?:[ \t]+of[ \t]+Services?)?")
                .pattern(SERVICE_PATTERN),
        ),
        FieldSpec::cascade(
            "currency",
            Cascade::new().labeled(r"Currency").pattern(CURRENCY_PATTERN),
        ),
        FieldSpec::cascade("country", Cascade::new().labeled(r"Country(?:[ \t]+of[ \t]+Service)?")),
        FieldSpec::cascade(
            "amount_charged",
            Cascade::new()
                .labeled_value(r"Amount(?:[ \t]+Charged)?", AMOUNT_PATTERN)
                .pattern(CENTS_AMOUNT_PATTERN),
        ),
    ]);

    RowExtractor::new(&format!(r"(?m)^[ \t]*{}", DATE_PATTERN), columns).until(TABLE_END)
});

/// Handler for SUPPLEMENT A.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplementAHandler;

impl SectionHandler for SupplementAHandler {
    fn section(&self) -> Section {
        Section::SupplementA
    }

    fn output_keys(&self) -> Vec<&'static str> {
        std::iter::once(TABLE_NAME).chain(ROWS.columns()).collect()
    }

    fn extract(&self, page_text: &str) -> PagePayload {
        let mut tables = TableMap::new();
        tables.insert(TABLE_NAME, ROWS.extract_rows(page_text));
        PagePayload::tables(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<crate::model::RowRecord> {
        let payload = SupplementAHandler.extract(text);
        payload.tables.unwrap().get(TABLE_NAME).cloned().unwrap()
    }

    #[test]
    fn test_two_charges_in_order() {
        let rows = rows(
            "SUPPLEMENT A \u{2014} NON-U.S. CLAIM ITEMIZATION FORM\n\
             Date of Service (MM/DD/YY) Provider Diagnosis Description of Services Currency Country Amount Charged\n\
             07/09/23 ACIBADEM Hospital\n\
             Diagnosis: virus\n\
             Examination and tests\n\
             TL (Turkish Lira) Turkey 4590.59\n\
             07/10/23 Memorial Clinic\n\
             Medication\n\
             TL (Turkish Lira) Turkey 458.35\n\
             Total: 5048.94",
        );
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].value("date_of_service_mm_dd_yy"), Some("07/09/2023"));
        assert_eq!(rows[0].value("provider"), Some("ACIBADEM Hospital"));
        assert_eq!(rows[0].value("diagnosis"), Some("virus"));
        assert_eq!(rows[0].value("description_of_services"), Some("Examination and tests"));
        assert_eq!(rows[0].value("currency"), Some("TL (Turkish Lira)"));
        assert_eq!(rows[0].value("amount_charged"), Some("4590.59"));

        assert_eq!(rows[1].value("date_of_service_mm_dd_yy"), Some("07/10/2023"));
        assert_eq!(rows[1].value("provider"), Some("Memorial Clinic"));
        assert_eq!(rows[1].value("diagnosis"), None);
        assert_eq!(rows[1].value("description_of_services"), Some("Medication"));
        assert_eq!(rows[1].value("amount_charged"), Some("458.35"));
    }

    #[test]
    fn test_dotted_dates_are_not_amounts() {
        let rows = rows(
            "SUPPLEMENT A \u{2014} NON-U.S. CLAIM ITEMIZATION FORM\n\
             07.09.23 ACIBADEM Hospital\n\
             Examination and tests\n\
             07.10.23 Memorial Clinic 458.35\n\
             Medication",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value("date_of_service_mm_dd_yy"), Some("07/09/2023"));
        assert_eq!(rows[0].value("amount_charged"), None);
        assert_eq!(rows[1].value("date_of_service_mm_dd_yy"), Some("07/10/2023"));
        assert_eq!(rows[1].value("amount_charged"), Some("458.35"));
    }

    #[test]
    fn test_empty_table() {
        assert!(rows("SUPPLEMENT A\nDate of Service Provider Amount").is_empty());
    }

    #[test]
    fn test_output_keys() {
        let keys = SupplementAHandler.output_keys();
        assert_eq!(keys[0], TABLE_NAME);
        assert!(keys.contains(&"amount_charged"));
    }
}
