//! Record types produced by the form parser.
//!
//! A parse yields one [`DocumentRecord`] owning an ordered list of
//! [`PageRecord`]s. Extracted values are `Option<String>`: `None` is the
//! absent marker (not found), distinct from any extracted string.

mod document;
mod fields;
mod page;
mod section;

pub use document::{DocumentMetadata, DocumentRecord};
pub use fields::{FieldMap, FieldValue, OrderedMap, RowRecord, TableMap};
pub use page::{PagePayload, PageRecord};
pub use section::{Section, UNCLASSIFIED};
