//! Page segmentation on `--- Page N ---` delimiters.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static DELIMITER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*-{2,}[ \t]*page[ \t]*([^\s-]*)[ \t]*-{2,}[ \t]*\r?$").expect("valid regex")
});

/// One page of text cut from the full document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSegment {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page text, trimmed
    pub text: String,
}

impl PageSegment {
    fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

struct Marker {
    start: usize,
    end: usize,
    embedded: Option<u32>,
}

/// Split full document text into ordered pages.
///
/// Never fails: text without any delimiter becomes a single page 1.
/// Embedded numbers are trusted only while they increase and leave room to
/// number the pages after them; otherwise the next sequential number is used.
pub fn segment(full_text: &str) -> Vec<PageSegment> {
    let markers = collect_markers(full_text);

    if markers.is_empty() {
        warn!("No page delimiters found, treating the whole text as page 1");
        return vec![PageSegment::new(1, full_text.trim())];
    }

    let preamble = full_text[..markers[0].start].trim();
    let mut pages: Vec<PageSegment> = Vec::with_capacity(markers.len());
    let mut last = 0u32;

    for (i, marker) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map_or(full_text.len(), |next| next.start);
        let body = full_text[marker.end..body_end].trim();

        let remaining = u32::try_from(markers.len() - i - 1).unwrap_or(u32::MAX);
        let next = last.saturating_add(1);
        let number = match marker.embedded {
            Some(n) if n > last && n.checked_add(remaining).is_some() => n,
            Some(n) => {
                warn!("Untrusted page delimiter {} after {}, using {}", n, last, next);
                next
            }
            None => {
                warn!("Unreadable page delimiter after page {}, using {}", last, next);
                next
            }
        };
        last = number;

        if i == 0 && !preamble.is_empty() {
            debug!("Prepending {} bytes of preamble to page {}", preamble.len(), number);
            pages.push(PageSegment::new(number, format!("{}\n{}", preamble, body)));
        } else {
            pages.push(PageSegment::new(number, body));
        }
    }

    pages
}

/// Find delimiters, dropping a marker that repeats the previous marker's
/// number with only whitespace between them.
fn collect_markers(text: &str) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Vec::new();

    for caps in DELIMITER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let embedded = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
        let marker = Marker {
            start: whole.start(),
            end: whole.end(),
            embedded,
        };

        if let Some(prev) = markers.last() {
            let duplicate = prev.embedded.is_some()
                && prev.embedded == marker.embedded
                && text[prev.end..marker.start].trim().is_empty();
            if duplicate {
                debug!("Dropping duplicate delimiter for page {:?}", marker.embedded);
                if let Some(prev) = markers.last_mut() {
                    prev.end = marker.end;
                }
                continue;
            }
        }

        markers.push(marker);
    }

    markers
}
