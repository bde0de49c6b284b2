//! Document assembly: segmentation, classification and per-page extraction.

use super::classify::classify;
use super::metadata::extract_metadata;
use super::options::ParseOptions;
use super::segment::{segment, PageSegment};
use crate::cleanup::CleanupPipeline;
use crate::error::{Error, Result};
use crate::model::{DocumentMetadata, DocumentRecord, PageRecord};
use crate::sections::HandlerRegistry;
use log::{debug, warn};
use rayon::prelude::*;
use std::borrow::Cow;

/// Claim form parser.
///
/// Holds only configuration; every call to [`FormParser::parse`] is
/// independent and deterministic for a fixed `extracted_at`.
#[derive(Debug, Clone, Default)]
pub struct FormParser {
    options: ParseOptions,
    registry: HandlerRegistry,
}

impl FormParser {
    /// Create a parser with default options and the built-in handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            registry: HandlerRegistry::with_defaults(),
        }
    }

    /// Use a custom handler registry.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Get the handler registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Parse the full OCR text of a document with `page_count` pages.
    ///
    /// Fails only when `page_count` is zero. Malformed text degrades to
    /// absent values, synthetic page numbers or unclassified pages.
    pub fn parse(&self, full_text: &str, page_count: u32) -> Result<DocumentRecord> {
        if page_count == 0 {
            return Err(Error::invalid_input("page_count must be at least 1"));
        }

        let text: Cow<'_, str> = match &self.options.cleanup {
            Some(cleanup) => Cow::Owned(CleanupPipeline::new(cleanup.clone()).process(full_text)),
            None => Cow::Borrowed(full_text),
        };

        let found = extract_metadata(&text);
        let mut metadata = DocumentMetadata::new(
            self.options.resolved_file_name(),
            page_count,
            self.options.resolved_extracted_at(),
        );
        metadata.document_type = found.document_type;
        metadata.envelope_id = found.envelope_id;
        metadata.declared_total_pages = found.declared_total_pages;

        let segments = segment(&text);
        if segments.len() != page_count as usize {
            warn!(
                "Segmented {} pages but the caller reported {}",
                segments.len(),
                page_count
            );
        }

        let mut pages: Vec<PageRecord> = if self.options.parallel && segments.len() > 1 {
            segments.par_iter().map(|s| self.parse_segment(s)).collect()
        } else {
            segments.iter().map(|s| self.parse_segment(s)).collect()
        };
        pages.sort_by_key(|p| p.number);

        let mut record = DocumentRecord::new(metadata);
        record.pages = pages;
        Ok(record)
    }

    /// Classify one page and run every matching handler on it.
    pub fn parse_page(&self, number: u32, page_text: &str) -> PageRecord {
        let mut page = PageRecord::new(number, page_text);
        let sections = classify(page_text);

        for section in &sections {
            match self.registry.get(*section) {
                Some(handler) => {
                    debug!("Page {}: running {} handler", number, handler.name());
                    page.absorb(handler.extract(page_text));
                }
                None => debug!("Page {}: no handler registered for {}", number, section),
            }
        }

        page.set_sections(sections);
        page
    }

    fn parse_segment(&self, segment: &PageSegment) -> PageRecord {
        self.parse_page(segment.number, &segment.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use chrono::{TimeZone, Utc};

    fn parser() -> FormParser {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        FormParser::with_options(ParseOptions::new().with_extracted_at(at).with_file_name("claim.pdf"))
    }

    #[test]
    fn test_zero_page_count_rejected() {
        let err = parser().parse("--- Page 1 ---\nfoo", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_metadata_filled() {
        let record = parser()
            .parse("--- Page 1 ---\nDocuSign Envelope ID: 12345678-ABCD-EF01-2345-6789ABCDEF01", 3)
            .unwrap();
        assert_eq!(record.document.file_name, "claim.pdf");
        assert_eq!(record.document.total_pages, 3);
        assert_eq!(record.page_count(), 1);
        assert_eq!(
            record.document.envelope_id.as_deref(),
            Some("12345678-ABCD-EF01-2345-6789ABCDEF01")
        );
    }

    #[test]
    fn test_boundary_page_runs_both_handlers() {
        let page = parser().parse_page(
            2,
            "PART A: CLAIMANT INFORMATION (Continued)\n\
             Name of School: Winchester High School\n\
             PART B: TRAVEL ASSISTANCE AND OTHER CLAIMS\n\
             X Trip Interruption",
        );
        assert_eq!(page.sections, vec![Section::ClaimantInfo, Section::TravelClaims]);
        assert_eq!(
            page.section,
            "PART A: CLAIMANT INFORMATION + PART B: TRAVEL ASSISTANCE AND OTHER CLAIMS"
        );
        assert_eq!(page.field("16a_school_name"), Some("Winchester High School"));
        assert_eq!(page.field("1b_applying_for_trip_interruption"), Some("Yes"));
    }

    #[test]
    fn test_unclassified_page_has_no_payload() {
        let page = parser().parse_page(1, "nothing recognisable");
        assert!(!page.is_classified());
        assert!(!page.has_payload());
        assert_eq!(page.raw_text, "nothing recognisable");
    }

    #[test]
    fn test_missing_handler_is_skipped() {
        let parser = parser().with_registry(HandlerRegistry::new());
        let page = parser.parse_page(1, "PART C: MEDICAL INFORMATION");
        assert_eq!(page.sections, vec![Section::MedicalInfo]);
        assert!(!page.has_payload());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text = "--- Page 1 ---\nPART A: CLAIMANT INFORMATION\n1A. Claimant's Full Name: Ilyas Malik\n\
                    --- Page 2 ---\nPART C: MEDICAL INFORMATION\n\
                    --- Page 3 ---\nnoise";
        let parallel = parser().parse(text, 3).unwrap();
        let sequential = FormParser::with_options(parser().options().clone().sequential())
            .parse(text, 3)
            .unwrap();
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.pages.iter().map(|p| p.number).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
