//! Repeating line-item extraction.

use super::extract::FieldSchema;
use crate::model::RowRecord;
use log::debug;
use regex::Regex;

/// Groups lines into rows on a repeating cue and extracts each row.
///
/// A row starts at a cue match and runs to the next cue or to the end of the
/// table region. The region starts at the first cue and ends at the first
/// match of the end pattern after it, or at the end of the page.
#[derive(Debug, Clone)]
pub struct RowExtractor {
    cue: Regex,
    end: Option<Regex>,
    columns: FieldSchema,
}

impl RowExtractor {
    /// Create an extractor with a row cue and a per-row schema.
    ///
    /// # Panics
    ///
    /// Panics if `cue` is not a valid regex.
    pub fn new(cue: &str, columns: FieldSchema) -> Self {
        Self {
            cue: Regex::new(cue).unwrap_or_else(|e| panic!("invalid row cue '{}': {}", cue, e)),
            end: None,
            columns,
        }
    }

    /// Stop the table at the first match of `end` after the first row.
    ///
    /// # Panics
    ///
    /// Panics if `end` is not a valid regex.
    pub fn until(mut self, end: &str) -> Self {
        self.end = Some(Regex::new(end).unwrap_or_else(|e| panic!("invalid table end '{}': {}", end, e)));
        self
    }

    /// Column keys in output order.
    pub fn columns(&self) -> Vec<&'static str> {
        self.columns.keys()
    }

    /// Extract rows in document order. Rows with no present value are
    /// dropped.
    pub fn extract_rows(&self, text: &str) -> Vec<RowRecord> {
        let Some(first) = self.cue.find(text) else {
            return Vec::new();
        };

        let region_end = self
            .end
            .as_ref()
            .and_then(|end| end.find_at(text, first.end()))
            .map_or(text.len(), |m| m.start());
        let region = &text[first.start()..region_end];

        let starts: Vec<usize> = self.cue.find_iter(region).map(|m| m.start()).collect();
        let rows: Vec<RowRecord> = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let stop = starts.get(i + 1).copied().unwrap_or(region.len());
                self.columns.extract(&region[start..stop])
            })
            .filter(|row| row.present_count() > 0)
            .collect();

        debug!("Extracted {} of {} cued rows", rows.len(), starts.len());
        rows
    }
}
