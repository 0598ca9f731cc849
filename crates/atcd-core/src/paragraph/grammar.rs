//! Building blocks shared by the pediatric and family paragraphs.
//!
//! A paragraph is a sequence of sections (`"<HEADER> <body>"`, joined with
//! `". "`). A body is a sequence of groups joined with `"; "`, and a group is a
//! sequence of fragments joined with `", "`. Decoding never fails: every
//! helper here returns `None` when its anchor is not found.

use regex::Regex;
use strsim::normalized_levenshtein;

use crate::models::present;

pub const SECTION_SEPARATOR: &str = ". ";
pub const GROUP_SEPARATOR: &str = "; ";
pub const FRAGMENT_SEPARATOR: &str = ", ";

/// Minimum similarity for a hand-edited enum label to be accepted.
const LABEL_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Start of a fragment: text start, or right after a delimiter.
const FRAGMENT_START: &str = r"(?:^|[,;:]\s*)";

/// A free-text value runs up to the next delimiter.
const VALUE: &str = r"([^.,;]+)";

// =========================================================================
// Encoding
// =========================================================================

/// Ordered fragments of one group.
#[derive(Debug, Default)]
pub struct Fragments(Vec<String>);

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<String>) {
        self.0.push(fragment.into());
    }

    /// `"<label>: <value>"` when the value is present.
    pub fn labelled(&mut self, label: &str, value: &Option<String>) {
        if let Some(value) = present(value) {
            self.0.push(format!("{label}: {value}"));
        }
    }

    /// `"<label>: <value> <unit>"` when the value is present.
    pub fn measured(&mut self, label: &str, value: &Option<String>, unit: &str) {
        if let Some(value) = present(value) {
            self.0.push(format!("{label}: {value} {unit}"));
        }
    }

    /// Fragments joined with `", "`, or `None` when nothing was pushed.
    pub fn join(self) -> Option<String> {
        join_present(self.0.into_iter().map(Some), FRAGMENT_SEPARATOR)
    }
}

/// Join the present parts with `separator`; `None` when all are absent.
pub fn join_present<I>(parts: I, separator: &str) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let parts: Vec<String> = parts.into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}

/// `"<header> <body>"`.
pub fn section(header: &str, body: Option<String>) -> Option<String> {
    body.map(|body| format!("{header} {body}"))
}

/// `"<label>: <group>"`, used for nested groups such as `Diversification:`.
pub fn nested(label: &str, group: Fragments) -> Option<String> {
    group.join().map(|inner| format!("{label}: {inner}"))
}

// =========================================================================
// Decoding
// =========================================================================

/// Build a section pattern.
///
/// `start` and `terminators` are regex fragments (already escaped). The body is
/// captured lazily from the first occurrence of `start` up to the next
/// terminator, which must be preceded by a period or whitespace, or to the end
/// of the text.
pub fn section_pattern(start: &str, terminators: &[&str]) -> Regex {
    let pattern = format!(
        r"(?is)(?:^|[\s.;,]){start}\s*(.*?)(?:(?:\.\s*|\s+)(?:{})|$)",
        terminators.join("|")
    );
    Regex::new(&pattern).unwrap()
}

/// Trimmed body of the first section matched by `pattern`.
pub fn capture_section<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim())
        .filter(|body| !body.is_empty())
}

/// Escape a literal header so it can be used in [`section_pattern`].
pub fn literal(header: &str) -> String {
    regex::escape(header)
}

/// A label-anchored field.
#[derive(Debug)]
pub struct Field(Regex);

impl Field {
    /// `"<label>: value"`.
    pub fn labelled(label: &str) -> Self {
        Self::build(&format!(r"{}\s*:\s*", regex::escape(label)))
    }

    /// `"<prefix> value"`, for fragments without a colon such as `Apgar 1min 8`.
    pub fn prefixed(prefix: &str) -> Self {
        Self::build(&format!(r"{}\s*", regex::escape(prefix)))
    }

    fn build(anchor: &str) -> Self {
        Self(Regex::new(&format!("(?i){FRAGMENT_START}{anchor}{VALUE}")).unwrap())
    }

    /// First trimmed, non-empty value in `text`.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.0
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|value| value.as_str().trim())
            .filter(|value| !value.is_empty())
    }

    /// Owned variant of [`Field::find`].
    pub fn extract(&self, text: &str) -> Option<String> {
        self.find(text).map(str::to_string)
    }

    /// Value with its trailing `unit` removed.
    pub fn extract_measure(&self, text: &str, unit: &str) -> Option<String> {
        self.find(text)
            .map(|value| strip_unit(value, unit))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// A nested group scope: `"<label>: ..."` up to the next `;`.
#[derive(Debug)]
pub struct Scope(Regex);

impl Scope {
    pub fn new(label: &str) -> Self {
        let pattern = format!(r"(?i)(?:^|;\s*){}\s*:\s*([^;]*)", regex::escape(label));
        Self(Regex::new(&pattern).unwrap())
    }

    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.0
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|group| group.as_str().trim())
            .filter(|group| !group.is_empty())
    }
}

/// A fixed phrase anchored at a fragment start, used for boolean fields.
pub fn phrase(phrase: &str) -> Regex {
    Regex::new(&format!("(?i){FRAGMENT_START}{}", regex::escape(phrase))).unwrap()
}

/// Remove a trailing unit (case-insensitive) and the whitespace before it.
pub fn strip_unit<'a>(value: &'a str, unit: &str) -> &'a str {
    let value = value.trim_end();
    let Some(cut) = value.len().checked_sub(unit.len()) else {
        return value;
    };
    match value.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(unit) => value[..cut].trim_end(),
        _ => value,
    }
}

/// Map a written label back to its enum value.
///
/// Exact (case-insensitive) matches win; otherwise the closest label is
/// accepted when its similarity clears the threshold, which tolerates missing
/// accents and small typos in hand-edited paragraphs.
pub fn match_label<T: Copy>(written: &str, options: &[T], label: fn(T) -> &'static str) -> Option<T> {
    let written = written.trim().to_lowercase();
    if written.is_empty() {
        return None;
    }

    if let Some(exact) = options.iter().copied().find(|&o| label(o) == written) {
        return Some(exact);
    }

    options
        .iter()
        .copied()
        .map(|o| (o, normalized_levenshtein(&written, label(o))))
        .filter(|(_, score)| *score >= LABEL_SIMILARITY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(o, _)| o)
}
