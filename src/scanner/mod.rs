//! Line-oriented pass over source text.
//!
//! Finds `class`/`module` declarations and the comment markers attached to
//! them, and flags lines that look like method definitions or assertions.
//! This is deliberately a text heuristic; the real structure comes from the
//! introspector.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_MARKER_TAG: &str = "ZenTest";

static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:class|module)\s+([\w:]+)").expect("valid declaration regex"));
static DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*def").expect("valid definition regex"));
static ASSERTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"assert|flunk").expect("valid assertion regex"));

/// Comment directive on a declaration line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    /// Ignore this class entirely.
    Skip,
    /// Keep methods every object has.
    Full,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub line: usize,
    pub marker: Option<Marker>,
}

/// What one line contributes, in the order it must be applied.
///
/// Definition and assertion counts go to the class that was open *before*
/// the line, so they precede a declaration found on the same line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    Definition,
    Assertion,
    Declaration(Declaration),
}

struct MarkerPatterns {
    skip: Regex,
    full: Regex,
}

impl MarkerPatterns {
    fn new(tag: &str) -> Self {
        let tag = regex::escape(tag);
        Self {
            skip: Regex::new(&format!(r"#\s*{tag}\s+SKIP")).expect("escaped marker regex"),
            full: Regex::new(&format!(r"#\s*{tag}\s+FULL")).expect("escaped marker regex"),
        }
    }

    fn marker(&self, line: &str) -> Option<Marker> {
        if self.skip.is_match(line) {
            Some(Marker::Skip)
        } else if self.full.is_match(line) {
            Some(Marker::Full)
        } else {
            None
        }
    }
}

pub struct LineScanner {
    markers: MarkerPatterns,
}

impl LineScanner {
    pub fn new(marker_tag: &str) -> Self {
        Self {
            markers: MarkerPatterns::new(marker_tag),
        }
    }

    pub fn scan(&self, text: &str) -> Vec<ScanEvent> {
        text.lines()
            .enumerate()
            .flat_map(|(i, line)| self.scan_line(line, i + 1))
            .collect()
    }

    fn scan_line(&self, line: &str, line_number: usize) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        if DEFINITION.is_match(line) {
            events.push(ScanEvent::Definition);
        }
        if ASSERTION.is_match(line) {
            events.push(ScanEvent::Assertion);
        }
        if let Some(captures) = DECLARATION.captures(line) {
            events.push(ScanEvent::Declaration(Declaration {
                name: captures[1].to_string(),
                line: line_number,
                marker: self.markers.marker(line),
            }));
        }
        events
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_TAG)
    }
}
