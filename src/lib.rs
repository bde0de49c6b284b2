//! # claimform
//!
//! Structured extraction of insurance claim form data from OCR text.
//!
//! The input is the full OCR text of a multi-page claim document, with each
//! page introduced by a delimiter line such as `--- PAGE 3 ---`. The output
//! is a [`DocumentRecord`]: document metadata plus one record per page with
//! the recognised section(s), form fields, signature blocks and line-item
//! tables. Values that could not be found are `None` (JSON `null`).
//!
//! ## Quick Start
//!
//! ```
//! use claimform::{parse_document, render};
//!
//! fn main() -> claimform::Result<()> {
//!     let text = "--- PAGE 1 ---\nPART A: CLAIMANT INFORMATION\n1A. Claimant's Full Name: Raheel Malik";
//!     let doc = parse_document(text, 1)?;
//!
//!     assert_eq!(doc.find_field("1a_claimant_full_name"), Some("Raheel Malik"));
//!     println!("{}", render::to_json(&doc, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page segmentation**: tolerant of missing or misnumbered delimiters
//! - **Section classification**: boundary pages carry every section found
//! - **Candidate cascades**: ordered patterns per field, first hit wins
//! - **Parallel processing**: uses Rayon for multi-page documents
//! - **Cleanup pipeline**: optional OCR text normalization before parsing

pub mod cleanup;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod sections;

// Re-export commonly used types
pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use error::{Error, Result};
pub use model::{
    DocumentMetadata, DocumentRecord, FieldMap, FieldValue, PagePayload, PageRecord, RowRecord,
    Section, TableMap, UNCLASSIFIED,
};
pub use parser::{classify, normalize, segment, FormParser, PageSegment, ParseOptions};
pub use render::JsonFormat;
pub use sections::{HandlerRegistry, SectionHandler};

use std::path::Path;

/// Parse the OCR text of a document with `page_count` physical pages.
///
/// `extracted_at` is read from the clock, so two calls with the same input
/// differ in that one field. Pin it with [`ParseOptions::with_extracted_at`]
/// and [`parse_document_with_options`] for byte-identical output.
///
/// # Example
///
/// ```
/// use claimform::parse_document;
///
/// let doc = parse_document("--- PAGE 1 ---\nnothing recognisable", 1).unwrap();
/// assert_eq!(doc.pages[0].section, claimform::UNCLASSIFIED);
/// ```
pub fn parse_document(full_text: &str, page_count: u32) -> Result<DocumentRecord> {
    FormParser::new().parse(full_text, page_count)
}

/// Parse OCR text with custom options.
///
/// # Example
///
/// ```
/// use claimform::{parse_document_with_options, ParseOptions};
///
/// let options = ParseOptions::new().sequential().with_file_name("claim.txt");
/// let doc = parse_document_with_options("--- PAGE 1 ---\n", 1, options).unwrap();
/// assert_eq!(doc.document.file_name, "claim.txt");
/// ```
pub fn parse_document_with_options(
    full_text: &str,
    page_count: u32,
    options: ParseOptions,
) -> Result<DocumentRecord> {
    FormParser::with_options(options).parse(full_text, page_count)
}

/// Read an OCR text file and parse it.
///
/// The record's `file_name` is the file's name. When `page_count` is `None`
/// the number of segmented pages is used.
///
/// # Example
///
/// ```no_run
/// use claimform::parse_file;
///
/// let doc = parse_file("claim_ocr.txt", None).unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, page_count: Option<u32>) -> Result<DocumentRecord> {
    parse_file_with_options(path, page_count, ParseOptions::default())
}

/// Read an OCR text file and parse it with custom options.
///
/// A `file_name` already set in `options` takes precedence over the path.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    page_count: Option<u32>,
    mut options: ParseOptions,
) -> Result<DocumentRecord> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;

    if options.file_name.is_none() {
        if let Some(name) = path.file_name() {
            options.file_name = Some(name.to_string_lossy().into_owned());
        }
    }

    let page_count = match page_count {
        Some(count) => count,
        None => u32::try_from(segment(&text).len())
            .map_err(|_| Error::invalid_input("page count does not fit in u32"))?,
    };

    parse_document_with_options(&text, page_count, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_document_zero_pages() {
        assert!(matches!(
            parse_document("anything", 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_file_defaults() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            file,
            "--- PAGE 1 ---\nPART C: MEDICAL INFORMATION\n--- PAGE 2 ---\nSUPPLEMENT B: ILLNESS OR INJURY"
        )
        .unwrap();

        let doc = parse_file(file.path(), None).unwrap();
        assert_eq!(doc.document.total_pages, 2);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.document.file_name.ends_with(".txt"));
        assert_eq!(doc.pages[1].sections, vec![Section::SupplementB]);
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/nonexistent/claim.txt", Some(1));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_explicit_file_name_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "--- PAGE 1 ---").unwrap();

        let options = ParseOptions::new().with_file_name("claim.pdf");
        let doc = parse_file_with_options(file.path(), Some(1), options).unwrap();
        assert_eq!(doc.document.file_name, "claim.pdf");
    }
}
