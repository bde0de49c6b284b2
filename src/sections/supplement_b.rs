//! SUPPLEMENT B: illness or injury treatment list.

use super::supplement_a::{CENTS_AMOUNT_PATTERN, PROVIDER_PATTERN, SERVICE_PATTERN, TABLE_END};
use super::SectionHandler;
use crate::model::{PagePayload, Section, TableMap};
use crate::parser::extract::{Candidate, Cascade, FieldSchema, FieldSpec, AMOUNT_PATTERN, PHONE_PATTERN};
use crate::parser::DATE_PATTERN;
use crate::parser::table::RowExtractor;
use once_cell::sync::Lazy;

/// Output table name.
pub const TABLE_NAME: &str = "supplement_b_items";

static ROWS: Lazy<RowExtractor> = Lazy::new(|| {
    let columns = FieldSchema::new(vec![
        FieldSpec::cascade(
            "date_of_service_mm_dd_yy",
            Cascade::new().then(Candidate::new(&format!(r"^\s*({})", DATE_PATTERN)).date()),
        ),
        FieldSpec::cascade(
            "provider",
            Cascade::new()
                .labeled(r"(?:Provider|Physician|Doctor)(?:[ \t]+Name)?")
                .pattern(PROVIDER_PATTERN),
        ),
        FieldSpec::cascade(
            "provider_telephone",
            Cascade::new().then(
                Candidate::labeled_value(r"(?:Tele)?phone", PHONE_PATTERN).min_digits(7),
            ),
        ),
        FieldSpec::cascade(
            "description_of_services",
            Cascade::new()
                .labeled(r"(?:Description(?:[ \t]+of[ \t]+(?:Services?|Treatment))?|Treatment)")
                .pattern(SERVICE_PATTERN),
        ),
        FieldSpec::cascade(
            "amount_charged",
            Cascade::new()
                .labeled_value(r"Amount(?:[ \t]+Charged)?", AMOUNT_PATTERN)
                .pattern(CENTS_AMOUNT_PATTERN),
        ),
    ]);

    RowExtractor::new(&format!(r"(?m)^[ \t]*{}", DATE_PATTERN), columns).until(TABLE_END)
});

/// Handler for SUPPLEMENT B.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplementBHandler;

impl SectionHandler for SupplementBHandler {
    fn section(&self) -> Section {
        Section::SupplementB
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
