//! Page-level types.

use super::{FieldMap, Section, TableMap};
use serde::{Deserialize, Serialize};

/// A single physical page of the parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page number (1-indexed)
    #[serde(rename = "page")]
    pub number: u32,

    /// Section label, labels joined with `" + "` on boundary pages
    pub section: String,

    /// Sections recognised on this page, in order of heading appearance
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Verbatim page text, kept for audit
    pub raw_text: String,

    /// Extracted form fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_fields: Option<FieldMap>,

    /// Extracted signature block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<FieldMap>,

    /// Extracted line-item tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<TableMap>,
}

impl PageRecord {
    /// Create an unclassified page with no payload.
    pub fn new(number: u32, raw_text: impl Into<String>) -> Self {
        Self {
            number,
            section: Section::joined_label(&[]),
            sections: Vec::new(),
            raw_text: raw_text.into(),
            form_fields: None,
            signatures: None,
            tables: None,
        }
    }

    /// Set the sections recognised on this page and refresh the label.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.section = Section::joined_label(&sections);
        self.sections = sections;
    }

    /// Merge one handler's payload into this page.
    ///
    /// Boundary pages receive one payload per section; maps of the same kind
    /// are merged key by key.
    pub fn absorb(&mut self, payload: PagePayload) {
        merge_into(&mut self.form_fields, payload.form_fields);
        merge_into(&mut self.signatures, payload.signatures);
        merge_into(&mut self.tables, payload.tables);
    }

    /// Check whether any heading was recognised.
    pub fn is_classified(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Check whether any structured payload was produced.
    pub fn has_payload(&self) -> bool {
        self.form_fields.is_some() || self.signatures.is_some() || self.tables.is_some()
    }

    /// Look up a present value in the form fields, then the signatures.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.form_fields
            .as_ref()
            .and_then(|f| f.value(key))
            .or_else(|| self.signatures.as_ref().and_then(|s| s.value(key)))
    }
}

/// Output of one section handler for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePayload {
    /// Form field map
    pub form_fields: Option<FieldMap>,
    /// Signature block map
    pub signatures: Option<FieldMap>,
    /// Tables by name
    pub tables: Option<TableMap>,
}

impl PagePayload {
    /// Payload carrying form fields only.
    pub fn fields(fields: FieldMap) -> Self {
        Self {
            form_fields: Some(fields),
            ..Self::default()
        }
    }

    /// Payload carrying a signature block only.
    pub fn signatures(signatures: FieldMap) -> Self {
        Self {
            signatures: Some(signatures),
            ..Self::default()
        }
    }

    /// Payload carrying tables only.
    pub fn tables(tables: TableMap) -> Self {
        Self {
            tables: Some(tables),
            ..Self::default()
        }
    }
}

fn merge_into<V>(slot: &mut Option<super::OrderedMap<V>>, incoming: Option<super::OrderedMap<V>>) {
    match (slot.as_mut(), incoming) {
        (Some(existing), Some(incoming)) => existing.merge(incoming),
        (None, Some(incoming)) => *slot = Some(incoming),
        (_, None) => {}
    }
}
