//! Field extraction primitives.
//!
//! A field is described by a [`FieldSpec`]: a key, a [`FieldRule`] and an
//! optional scope. The common rule is a cascade of [`Candidate`]s tried in
//! order, where the first candidate yielding a non-empty normalized value
//! wins. Checkbox, choice and yes/no questions have dedicated rules built on
//! the same mark detection.

use super::normalize::{normalize, normalize_date, DATE_PATTERN};
use crate::error::{Error, Result};
use crate::model::{FieldMap, FieldValue};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Capitalised personal name of two to four words.
pub const NAME_PATTERN: &str = r"(?-i:[A-Z][a-z'\-]+(?:[ \t]+[A-Z][a-z'\-]+){1,3})";

/// E-mail address.
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}";

/// Telephone number, loosely.
pub const PHONE_PATTERN: &str = r"\+?\(?\d[\d \-().]{5,}\d";

/// US ZIP or ZIP+4, or a numeric postal code.
pub const POSTAL_PATTERN: &str = r"\d{4,6}(?:-\d{4})?";

/// Monetary amount with optional thousands separators and cents.
pub const AMOUNT_PATTERN: &str = r"\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+(?:\.\d{2})?";

/// Numbered field label such as `2A.` that starts the next field.
static FIELD_LABEL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[A-Da-d]\.").expect("valid regex"));

static NEXT_FIELD_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[A-Da-d]\.").expect("valid regex"));

static YES_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\byes\b").expect("valid regex"));
static NO_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bno\b").expect("valid regex"));

/// Characters after a yes/no question searched for the answer.
const ANSWER_WINDOW: usize = 160;

/// Characters allowed between a checkbox mark and its option text.
const MARK_GAP: usize = 3;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::invalid_input(format!("bad pattern '{}': {}", pattern, e)))
}

fn compile_static(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern '{}': {}", pattern, e))
}

/// How a matching candidate turns its match into a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureRule {
    /// Normalized capture group
    Group(usize),
    /// Normalized whole match
    Whole,
    /// Capture group parsed as a date, rendered `MM/DD/YYYY`
    Date(usize),
    /// Capture group holding at least `min` digits
    MinDigits { group: usize, min: usize },
    /// Fixed value whenever the pattern matches
    Literal(&'static str),
}

/// One strategy in a field's fallback cascade.
#[derive(Debug, Clone)]
pub struct Candidate {
    pattern: Regex,
    capture: CaptureRule,
    reject: Vec<String>,
}

impl Candidate {
    /// Build a candidate from a built-in pattern, capturing group 1.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Use [`Candidate::try_new`]
    /// for patterns that are not compile-time constants.
    pub fn new(pattern: &str) -> Self {
        Self::from_regex(compile_static(pattern))
    }

    /// Build a candidate, reporting an invalid pattern as an error.
    pub fn try_new(pattern: &str) -> Result<Self> {
        compile(pattern).map(Self::from_regex)
    }

    fn from_regex(pattern: Regex) -> Self {
        Self {
            pattern,
            capture: CaptureRule::Group(1),
            reject: Vec::new(),
        }
    }

    /// Value on the same line as `label`, up to the next `2A.` style label.
    pub fn same_line(label: &str) -> Self {
        Self::new(&format!(
            r"(?im)(?:{})[ \t]*[:\-#]?[ \t]*([^\n]*?)[ \t]*(?:\b\d{{1,2}}[A-Da-d]\.[ \t]|$)",
            label
        ))
    }

    /// Like [`Candidate::same_line`], but a bare `3.` item number also ends
    /// the value.
    pub fn same_line_item(label: &str) -> Self {
        Self::new(&format!(
            r"(?im)(?:{})[ \t]*[:\-#]?[ \t]*([^\n]*?)[ \t]*(?:\b\d{{1,2}}[A-Da-d]?\.[ \t]|$)",
            label
        ))
    }

    /// Whole next line after a `label` that ends its own line.
    pub fn next_line(label: &str) -> Self {
        Self::new(&format!(
            r"(?im)(?:{})[ \t]*[:\-#]?[ \t]*\r?\n[ \t]*([^\n]+)",
            label
        ))
    }

    /// First `value` shortly after `label`, on the same or the next line.
    ///
    /// Neither `label` nor `value` may contain capture groups.
    pub fn labeled_value(label: &str, value: &str) -> Self {
        Self::new(&format!(
            r"(?i)(?:{})[^\n]{{0,40}}?[ \t]*(?:\r?\n[ \t]*)?({})",
            label, value
        ))
    }

    /// Set the capture rule.
    pub fn capture(mut self, rule: CaptureRule) -> Self {
        self.capture = rule;
        self
    }

    /// Capture the whole match.
    pub fn whole(self) -> Self {
        self.capture(CaptureRule::Whole)
    }

    /// Parse group 1 as a date.
    pub fn date(self) -> Self {
        self.capture(CaptureRule::Date(1))
    }

    /// Require at least `min` digits in group 1.
    pub fn min_digits(self, min: usize) -> Self {
        self.capture(CaptureRule::MinDigits { group: 1, min })
    }

    /// Produce `value` whenever the pattern matches.
    pub fn literal(self, value: &'static str) -> Self {
        self.capture(CaptureRule::Literal(value))
    }

    /// Reject values containing any of `needles` (case-insensitive).
    pub fn reject(mut self, needles: &[&str]) -> Self {
        self.reject.extend(needles.iter().map(|n| n.to_lowercase()));
        self
    }

    /// Apply this candidate to `text`.
    ///
    /// Every match is considered in order; the first one producing an
    /// acceptable value wins.
    pub fn apply(&self, text: &str) -> FieldValue {
        self.pattern
            .captures_iter(text)
            .find_map(|caps| self.value_from(&caps))
    }

    fn value_from(&self, caps: &Captures<'_>) -> FieldValue {
        let group = |n: usize| caps.get(n).map(|m| m.as_str());

        let value = match &self.capture {
            CaptureRule::Literal(value) => return Some((*value).to_string()),
            CaptureRule::Group(n) => normalize(group(*n))?,
            CaptureRule::Whole => normalize(group(0))?,
            CaptureRule::Date(n) => normalize_date(group(*n)?)?,
            CaptureRule::MinDigits { group: n, min } => {
                let value = normalize(group(*n))?;
                if value.chars().filter(char::is_ascii_digit).count() < *min {
                    return None;
                }
                value
            }
        };

        if FIELD_LABEL_PREFIX.is_match(&value) {
            return None;
        }
        let lowered = value.to_lowercase();
        if self.reject.iter().any(|needle| lowered.contains(needle.as_str())) {
            return None;
        }
        Some(value)
    }
}

/// Try `candidates` in order; the first acceptable value wins.
pub fn extract(text: &str, candidates: &[Candidate]) -> FieldValue {
    first_match(text, candidates).map(|(_, value)| value)
}

fn first_match(text: &str, candidates: &[Candidate]) -> Option<(usize, String)> {
    candidates
        .iter()
        .enumerate()
        .find_map(|(i, candidate)| candidate.apply(text).map(|value| (i, value)))
}

/// Builder for an ordered candidate list.
#[derive(Debug, Clone, Default)]
pub struct Cascade {
    candidates: Vec<Candidate>,
}

impl Cascade {
    /// Create an empty cascade.
    pub fn new() -> Self {
        Self::default()
    }

    /// Free text after `label`: same line first, then the next line.
    pub fn labeled(self, label: &str) -> Self {
        self.then(Candidate::same_line(label))
            .then(Candidate::next_line(label))
    }

    /// Free text after a label on a form with bare `3.` item numbers.
    pub fn labeled_item(self, label: &str) -> Self {
        self.then(Candidate::same_line_item(label))
            .then(Candidate::next_line(label))
    }

    /// A `value`-shaped token after `label`.
    pub fn labeled_value(self, label: &str, value: &str) -> Self {
        self.then(Candidate::labeled_value(label, value))
    }

    /// A date after `label`.
    pub fn labeled_date(self, label: &str) -> Self {
        self.then(Candidate::labeled_value(label, DATE_PATTERN).date())
    }

    /// A bare pattern capturing group 1.
    pub fn pattern(self, pattern: &str) -> Self {
        self.then(Candidate::new(pattern))
    }

    /// Append a candidate.
    pub fn then(mut self, candidate: Candidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Add a reject list to every candidate added so far.
    pub fn rejecting(mut self, needles: &[&str]) -> Self {
        self.candidates = self
            .candidates
            .into_iter()
            .map(|c| c.reject(needles))
            .collect();
        self
    }

    /// The candidates in order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}

/// Find whether `option` occurs in `text` and whether any occurrence is
/// marked.
fn option_status(text: &str, option: &Regex) -> (bool, bool) {
    let mut present = false;
    for m in option.find_iter(text) {
        present = true;
        if marked_before(text, m.start()) || marked_after(text, m.end()) {
            return (true, true);
        }
    }
    (present, false)
}

fn is_mark(c: char) -> bool {
    matches!(
        c,
        'X' | 'x' | '\u{2713}' | '\u{2714}' | '\u{2611}' | '\u{2612}' | '\u{25A0}' | '\u{2717}' | '\u{2718}'
    )
}

fn is_mark_padding(c: char) -> bool {
    matches!(c, ' ' | '\t' | '[' | ']' | '(' | ')')
}

/// A mark immediately before the option, e.g. `X Travel Delay` or `[X]Yes`.
fn marked_before(text: &str, start: usize) -> bool {
    let mut chars = text[..start].chars().rev().peekable();
    let mut gap = 0;
    while chars.peek().is_some_and(|c| is_mark_padding(*c)) && gap < MARK_GAP {
        chars.next();
        gap += 1;
    }
    match chars.next() {
        Some(c) if is_mark(c) && c.is_ascii_alphabetic() => {
            !chars.next().is_some_and(char::is_alphanumeric)
        }
        Some(c) => is_mark(c),
        None => false,
    }
}

/// A trailing mark after the option with nothing else on the line, e.g.
/// `Travel Delay X`.
fn marked_after(text: &str, end: usize) -> bool {
    let rest = &text[end..];
    let mut chars = rest.chars().peekable();
    let mut gap = 0;
    while chars.peek().is_some_and(|c| is_mark_padding(*c)) && gap < MARK_GAP {
        chars.next();
        gap += 1;
    }
    match chars.next() {
        Some(c) if is_mark(c) => chars
            .take_while(|c| *c != '\n')
            .all(|c| c.is_whitespace() || is_mark_padding(c)),
        _ => false,
    }
}

/// Checkbox option: marked, unmarked or missing.
#[derive(Debug, Clone)]
pub struct CheckboxRule {
    option: Regex,
}

impl CheckboxRule {
    /// Create a rule for the option phrase `option`.
    pub fn new(option: &str) -> Self {
        Self {
            option: compile_static(option),
        }
    }

    /// `Some(true)` when marked, `Some(false)` when present but unmarked.
    pub fn check(&self, text: &str) -> Option<bool> {
        match option_status(text, &self.option) {
            (_, true) => Some(true),
            (true, false) => Some(false),
            (false, false) => None,
        }
    }
}

/// Exactly one of several options marked.
#[derive(Debug, Clone)]
pub struct ChoiceRule {
    options: Vec<(&'static str, Regex)>,
}

impl ChoiceRule {
    /// Create a rule from `(label, pattern)` pairs.
    pub fn new(options: &[(&'static str, &str)]) -> Self {
        Self {
            options: options
                .iter()
                .map(|(label, pattern)| (*label, compile_static(pattern)))
                .collect(),
        }
    }

    /// The label of the single marked option, if exactly one is marked.
    pub fn choose(&self, text: &str) -> Option<&'static str> {
        let mut marked = self
            .options
            .iter()
            .filter(|(_, pattern)| option_status(text, pattern).1)
            .map(|(label, _)| *label);

        match (marked.next(), marked.next()) {
            (Some(label), None) => Some(label),
            _ => None,
        }
    }
}

/// Yes/no question answered by marks or bare tokens after the question.
#[derive(Debug, Clone)]
pub struct YesNoRule {
    question: Regex,
}

impl YesNoRule {
    /// Create a rule for the question phrase `question`.
    pub fn new(question: &str) -> Self {
        Self {
            question: compile_static(question),
        }
    }

    /// Tri-state answer; ambiguous or missing answers are `None`.
    pub fn answer(&self, text: &str) -> Option<bool> {
        let m = self.question.find(text)?;
        let window = answer_window(&text[m.end()..]);

        let (yes_present, yes_marked) = option_status(window, &YES_TOKEN);
        let (no_present, no_marked) = option_status(window, &NO_TOKEN);

        match (yes_marked, no_marked) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            (true, true) => None,
            (false, false) => match (yes_present, no_present) {
                (true, false) => Some(true),
                (false, true) => Some(false),
                _ => None,
            },
        }
    }
}

/// Text after a question, bounded by length and by the next numbered label.
fn answer_window(after: &str) -> &str {
    let limit = after
        .char_indices()
        .nth(ANSWER_WINDOW)
        .map_or(after.len(), |(i, _)| i);
    let bounded = &after[..limit];
    match NEXT_FIELD_LABEL.find(bounded) {
        Some(next) => &bounded[..next.start()],
        None => bounded,
    }
}

fn yes_no(answer: bool) -> String {
    let label = if answer { "Yes" } else { "No" };
    label.to_string()
}

/// Extraction strategy of a single field.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Ordered fallback candidates
    Cascade(Cascade),
    /// Yes/no question, rendered "Yes"/"No"
    YesNo(YesNoRule),
    /// Checkbox option, rendered "Yes"/"No"
    Checkbox(CheckboxRule),
    /// Single marked option, rendered as its label
    Choice(ChoiceRule),
}

/// Region of the page a field is searched in.
#[derive(Debug, Clone, Default)]
struct Scope {
    after: Option<Regex>,
    before: Option<Regex>,
}

impl Scope {
    /// `None` when a required `after` anchor is missing.
    fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        let start = match &self.after {
            Some(anchor) => anchor.find(text)?.end(),
            None => 0,
        };
        let rest = &text[start..];
        let end = self
            .before
            .as_ref()
            .and_then(|b| b.find(rest))
            .map_or(rest.len(), |m| m.start());
        Some(&rest[..end])
    }
}

/// A field key with its extraction rule.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    key: &'static str,
    rule: FieldRule,
    scope: Scope,
}

impl FieldSpec {
    /// Create a field from a rule.
    pub fn new(key: &'static str, rule: FieldRule) -> Self {
        Self {
            key,
            rule,
            scope: Scope::default(),
        }
    }

    /// Field extracted by a candidate cascade.
    pub fn cascade(key: &'static str, cascade: Cascade) -> Self {
        Self::new(key, FieldRule::Cascade(cascade))
    }

    /// Field answering a yes/no question.
    pub fn yes_no(key: &'static str, question: &str) -> Self {
        Self::new(key, FieldRule::YesNo(YesNoRule::new(question)))
    }

    /// Field reporting whether a checkbox option is marked.
    pub fn checkbox(key: &'static str, option: &str) -> Self {
        Self::new(key, FieldRule::Checkbox(CheckboxRule::new(option)))
    }

    /// Field reporting which one of several options is marked.
    pub fn choice(key: &'static str, options: &[(&'static str, &str)]) -> Self {
        Self::new(key, FieldRule::Choice(ChoiceRule::new(options)))
    }

    /// Search only after the first match of `anchor`; absent without it.
    pub fn after(mut self, anchor: &str) -> Self {
        self.scope.after = Some(compile_static(anchor));
        self
    }

    /// Search only before the first match of `boundary`.
    pub fn before(mut self, boundary: &str) -> Self {
        self.scope.before = Some(compile_static(boundary));
        self
    }

    /// The output key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Extract this field's value from `text`.
    pub fn extract(&self, text: &str) -> FieldValue {
        let scoped = self.scope.slice(text)?;

        match &self.rule {
            FieldRule::Cascade(cascade) => {
                let (index, value) = first_match(scoped, cascade.candidates())?;
                debug!("{}: candidate {} matched", self.key, index);
                Some(value)
            }
            FieldRule::YesNo(rule) => rule.answer(scoped).map(yes_no),
            FieldRule::Checkbox(rule) => rule.check(scoped).map(yes_no),
            FieldRule::Choice(rule) => rule.choose(scoped).map(str::to_string),
        }
    }
}

/// Ordered field list producing a fixed-key map.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    /// Create a schema; key order is output order.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Keys in output order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(FieldSpec::key).collect()
    }

    /// Extract every field. Every key is present; misses are `None`.
    pub fn extract(&self, text: &str) -> FieldMap {
        self.fields
            .iter()
            .map(|field| (field.key, field.extract(text)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_line_stops_at_next_label() {
        let text = "1A. Claimant's Full Name: Ilyas Malik ... 2A. Gender: Male";
        let c = Candidate::same_line(r"Full\s+Name");
        assert_eq!(c.apply(text), Some("Ilyas Malik".to_string()));
    }

    #[test]
    fn test_same_line_keeps_numbered_free_text() {
        let text = "2B. Describe the incident: Delayed 2. Missed connection";
        let c = Candidate::same_line(r"Describe\s+the\s+incident");
        assert_eq!(c.apply(text), Some("Delayed 2. Missed connection".to_string()));

        let item = Candidate::same_line_item(r"Address");
        assert_eq!(
            item.apply("2. Address: 69 Sylvester Avenue 3. City: Winchester"),
            Some("69 Sylvester Avenue".to_string())
        );
    }

    #[test]
    fn test_next_line() {
        let text = "Name of School:\nWinchester High School\nCity:";
        let c = Candidate::next_line(r"Name\s+of\s+School");
        assert_eq!(c.apply(text), Some("Winchester High School".to_string()));
    }

    #[test]
    fn test_empty_match_continues_cascade() {
        let text = "Email Address: ____\nContact: ilyas@example.com";
        let cascade = Cascade::new()
            .labeled(r"Email\s+Address")
            .pattern(&format!("({})", EMAIL_PATTERN));
        assert_eq!(extract(text, cascade.candidates()), Some("ilyas@example.com".to_string()));
    }

    #[test]
    fn test_label_remnant_is_not_a_value() {
        let text = "Claimant Name:\n2A. Gender: Male";
        let c = Candidate::next_line(r"Claimant\s+Name");
        assert_eq!(c.apply(text), None);
    }

    #[test]
    fn test_labeled_date_canonicalised() {
        let cascade = Cascade::new().labeled_date(r"Date\s+of\s+Birth");
        let text = "3A. Date of Birth (MM/DD/YY): 7/3/08";
        assert_eq!(extract(text, cascade.candidates()), Some("07/03/2008".to_string()));

        let text = "3A. Date of Birth (MM/DD/YY): 13/45/08";
        assert_eq!(extract(text, cascade.candidates()), None);
    }

    #[test]
    fn test_min_digits_and_reject() {
        let phone = Candidate::labeled_value(r"Phone", PHONE_PATTERN).min_digits(7);
        assert_eq!(phone.apply("Phone: 12-34"), None);
        assert_eq!(phone.apply("Phone: +1 (248) 555-0100"), Some("+1 (248) 555-0100".to_string()));

        let zip = Candidate::labeled_value(r"Zip", POSTAL_PATTERN).reject(&["48333"]);
        assert_eq!(zip.apply("Zip 48333-2005"), None);
        assert_eq!(zip.apply("Zip 48333 ... Zip 10001"), Some("10001".to_string()));
    }

    #[test]
    fn test_literal_capture() {
        let c = Candidate::new(r"(?i)wire\s+transfer").literal("Wire");
        assert_eq!(c.apply("Pay by WIRE TRANSFER"), Some("Wire".to_string()));
    }

    #[test]
    fn test_checkbox() {
        let rule = CheckboxRule::new(r"(?i)Travel\s+Delay");
        assert_eq!(rule.check("X Travel Delay"), Some(true));
        assert_eq!(rule.check("[X] Travel Delay"), Some(true));
        assert_eq!(rule.check("\u{2612}Travel Delay"), Some(true));
        assert_eq!(rule.check("Travel Delay X\nLost Luggage"), Some(true));
        assert_eq!(rule.check("Box Travel Delay"), Some(false));
        assert_eq!(rule.check("Lost Luggage"), None);
    }

    #[test]
    fn test_choice_requires_exactly_one_mark() {
        let rule = ChoiceRule::new(&[("Check", r"\bCheck\b"), ("Wire", r"\bWire\b")]);
        assert_eq!(rule.choose("[ ] Check  [X] Wire"), Some("Wire"));
        assert_eq!(rule.choose("X Check X Wire"), None);
        assert_eq!(rule.choose("Check Wire"), None);
    }

    #[test]
    fn test_yes_no() {
        let rule = YesNoRule::new(r"(?i)employed");
        assert_eq!(rule.answer("17A. Are you employed? X Yes No"), Some(true));
        assert_eq!(rule.answer("17A. Are you employed? Yes X No"), Some(false));
        assert_eq!(rule.answer("17A. Are you employed? No"), Some(false));
        assert_eq!(rule.answer("17A. Are you employed? Yes No"), None);
        assert_eq!(rule.answer("17A. Are you employed? X Yes X No"), None);
        assert_eq!(rule.answer("Unrelated text"), None);
    }

    #[test]
    fn test_yes_no_window_stops_at_next_field() {
        let rule = YesNoRule::new(r"(?i)employed");
        assert_eq!(rule.answer("17A. Are you employed? 18A. Other insurance? Yes"), None);
    }

    #[test]
    fn test_field_spec_scope() {
        let spec = FieldSpec::cascade("city", Cascade::new().labeled(r"City")).after(r"Name of School");
        assert_eq!(spec.extract("City: Boston"), None);
        assert_eq!(
            spec.extract("City: Boston\nName of School: X\nCity: Winchester"),
            Some("Winchester".to_string())
        );

        let spec = FieldSpec::cascade("city", Cascade::new().labeled(r"City")).before(r"THIRD PARTY");
        assert_eq!(spec.extract("THIRD PARTY\nCity: Winchester"), None);
    }

    #[test]
    fn test_schema_has_every_key() {
        let schema = FieldSchema::new(vec![
            FieldSpec::cascade("a", Cascade::new().labeled("Alpha")),
            FieldSpec::checkbox("b", r"(?i)beta"),
        ]);
        let map = schema.extract("Alpha: one");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.value("a"), Some("one"));
        assert_eq!(map.get("b"), Some(&None));
    }

    #[test]
    fn test_try_new_reports_bad_pattern() {
        assert!(matches!(Candidate::try_new("(unclosed"), Err(Error::InvalidInput(_))));
    }
}
