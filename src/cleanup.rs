//! OCR text cleanup applied before segmentation.
//!
//! Every stage works line by line or on character classes that never occur
//! in a page delimiter, so `--- Page N ---` lines survive unchanged.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\u{00A0}\u{2000}-\u{200A}\u{202F}\u{205F}\u{3000}]{2,}").expect("valid regex"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9)])[ \t]+([:;,!?])").expect("valid regex"));
static PIPE_AS_I: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[\s(])\|([a-z])").expect("valid regex"));
static TILDE_AS_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w)[ \t]*~[ \t]*(\w)").expect("valid regex"));

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization and zero-width removal only
    Minimal,
    /// Standard cleanup: character fixes plus whitespace and line cleanup
    #[default]
    Standard,
}

impl std::str::FromStr for CleanupPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(CleanupPreset::Minimal),
            "standard" => Ok(CleanupPreset::Standard),
            other => Err(format!("unknown cleanup preset '{}'", other)),
        }
    }
}

/// Options for OCR text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove zero-width characters (ZWSP, ZWNJ, ZWJ, BOM)
    pub remove_zero_width: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Replace curly quotes with ASCII quotes
    pub normalize_quotes: bool,

    /// Collapse runs of spaces and tabs to one space
    pub collapse_spaces: bool,

    /// Trim leading and trailing whitespace of each line
    pub trim_lines: bool,

    /// Remove whitespace before `:` `;` `,` `!` `?`
    pub fix_punctuation_spacing: bool,

    /// Collapse three or more newlines to one blank line
    pub collapse_blank_lines: bool,

    /// Read a `|` glued to a lowercase word as a capital `I`
    pub fix_pipe_as_i: bool,

    /// Read a `~` between word characters as `-`
    pub fix_tilde_as_dash: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_zero_width: true,
            remove_replacement_char: false,
            normalize_quotes: false,
            collapse_spaces: false,
            trim_lines: false,
            fix_punctuation_spacing: false,
            collapse_blank_lines: false,
            fix_pipe_as_i: false,
            fix_tilde_as_dash: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_zero_width: true,
            remove_replacement_char: true,
            normalize_quotes: true,
            collapse_spaces: true,
            trim_lines: true,
            fix_punctuation_spacing: true,
            collapse_blank_lines: true,
            fix_pipe_as_i: false,
            fix_tilde_as_dash: false,
        }
    }

    /// Enable the common OCR glyph corrections.
    pub fn with_glyph_fixes(mut self) -> Self {
        self.fix_pipe_as_i = true;
        self.fix_tilde_as_dash = true;
        self
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.replace("\r\n", "\n");

        // Stage 1: character level
        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.remove_zero_width {
            result.retain(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'));
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.normalize_quotes {
            result = self.normalize_quotes(&result);
        }

        if self.options.fix_pipe_as_i {
            result = PIPE_AS_I.replace_all(&result, "${1}I${2}").into_owned();
        }

        if self.options.fix_tilde_as_dash {
            result = TILDE_AS_DASH.replace_all(&result, "${1}-${2}").into_owned();
        }

        // Stage 2: line level
        if self.options.collapse_spaces {
            result = SPACE_RUN.replace_all(&result, " ").into_owned();
        }

        if self.options.fix_punctuation_spacing {
            result = SPACE_BEFORE_PUNCT.replace_all(&result, "${1}${2}").into_owned();
        }

        if self.options.trim_lines {
            result = result.lines().map(str::trim).collect::<Vec<_>>().join("\n");
        }

        // Stage 3: layout
        if self.options.collapse_blank_lines {
            result = BLANK_LINES.replace_all(&result, "\n\n").into_owned();
        }

        result
    }

    fn normalize_quotes(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
                '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
                other => other,
            })
            .collect()
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}
