//! Claim form parsing module.

mod classify;
pub mod extract;
mod form_parser;
mod metadata;
mod normalize;
mod options;
mod segment;
pub mod table;

pub use classify::classify;
pub use form_parser::FormParser;
pub use metadata::{extract_metadata, TextMetadata};
pub use normalize::{normalize, normalize_date, normalize_str, DATE_PATTERN};
pub use options::{ParseOptions, UNKNOWN_FILE_NAME};
pub use segment::{segment, PageSegment};
