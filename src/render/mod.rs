//! Rendering module for converting parsed claim forms to output formats.

mod json;
mod summary;

pub use json::{to_json, JsonFormat};
pub use summary::to_summary;
