//! Document-level types.

use super::{PageRecord, Section};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed claim form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document-level metadata
    pub document: DocumentMetadata,

    /// Pages in physical order
    pub pages: Vec<PageRecord>,
}

impl DocumentRecord {
    /// Create a record with the given metadata and no pages.
    pub fn new(document: DocumentMetadata) -> Self {
        Self {
            document,
            pages: Vec::new(),
        }
    }

    /// Get the number of segmented pages.
    ///
    /// May differ from `document.total_pages`, which is the caller's count.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Pages on which `section` was recognised.
    pub fn pages_in(&self, section: Section) -> impl Iterator<Item = &PageRecord> {
        self.pages
            .iter()
            .filter(move |p| p.sections.contains(&section))
    }

    /// First present value of `key` across all pages.
    pub fn find_field(&self, key: &str) -> Option<&str> {
        self.pages.iter().find_map(|p| p.field(key))
    }

    /// Check if the record has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Caller-supplied source name (opaque)
    pub file_name: String,

    /// Recognised form title
    pub document_type: Option<String>,

    /// Caller-supplied page count
    pub total_pages: u32,

    /// Envelope identifier found anywhere in the text
    pub envelope_id: Option<String>,

    /// Page total printed in a "Page N of M" footer
    pub declared_total_pages: Option<u32>,

    /// Extraction timestamp
    pub extracted_at: DateTime<Utc>,
}

impl DocumentMetadata {
    /// Create metadata with nothing recognised yet.
    pub fn new(file_name: impl Into<String>, total_pages: u32, extracted_at: DateTime<Utc>) -> Self {
        Self {
            file_name: file_name.into(),
            document_type: None,
            total_pages,
            envelope_id: None,
            declared_total_pages: None,
            extracted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata() -> DocumentMetadata {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        DocumentMetadata::new("claim.txt", 2, at)
    }

    #[test]
    fn test_document_new() {
        let doc = DocumentRecord::new(metadata());
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.document.total_pages, 2);
    }

    #[test]
    fn test_get_page_and_sections() {
        let mut doc = DocumentRecord::new(metadata());
        let mut page = PageRecord::new(1, "PART C");
        page.set_sections(vec![Section::MedicalInfo]);
        doc.pages.push(page);
        doc.pages.push(PageRecord::new(2, "noise"));

        assert_eq!(doc.get_page(2).map(|p| p.number), Some(2));
        assert!(doc.get_page(0).is_none());
        assert_eq!(doc.pages_in(Section::MedicalInfo).count(), 1);
    }

    #[test]
    fn test_metadata_serializes_absent_as_null() {
        let json = serde_json::to_value(metadata()).unwrap();
        assert!(json["envelope_id"].is_null());
        assert!(json["document_type"].is_null());
        assert_eq!(json["total_pages"], 2);
    }
}
