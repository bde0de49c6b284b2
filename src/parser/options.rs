//! Parsing options and configuration.

use crate::cleanup::{CleanupOptions, CleanupPreset};
use chrono::{DateTime, Utc};

/// File name recorded when the caller supplies none.
pub const UNKNOWN_FILE_NAME: &str = "unknown";

/// Options for parsing claim form text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether to extract pages in parallel
    pub parallel: bool,

    /// Source name copied into the record
    pub file_name: Option<String>,

    /// Fixed extraction timestamp (defaults to now)
    pub extracted_at: Option<DateTime<Utc>>,

    /// OCR cleanup applied before segmentation
    pub cleanup: Option<CleanupOptions>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the source file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Pin the extraction timestamp.
    pub fn with_extracted_at(mut self, at: DateTime<Utc>) -> Self {
        self.extracted_at = Some(at);
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup from a preset.
    pub fn with_cleanup_preset(self, preset: CleanupPreset) -> Self {
        self.with_cleanup(CleanupOptions::from_preset(preset))
    }

    pub(crate) fn resolved_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(UNKNOWN_FILE_NAME)
    }

    pub(crate) fn resolved_extracted_at(&self) -> DateTime<Utc> {
        self.extracted_at.unwrap_or_else(Utc::now)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            file_name: None,
            extracted_at: None,
            cleanup: None,
        }
    }
}
