//! Paragraph encoder/decoder for the history records.
//!
//! The paragraph is the system of record: structured data only lives in the
//! form while a clinician edits it. Encoding is deterministic and total.
//! Decoding is best-effort and total as well: anything it cannot find is left
//! unset, without error.
//!
//! Decoding is not an exact inverse. Free-text values stop at the first `,`,
//! `.` or `;`, so `Profession: ingénieur, senior` reads back as `ingénieur`.
//! Re-encoding a decoded record is stable.

pub mod family;
pub mod grammar;
pub mod pediatric;

pub use family::{format_family_paragraph, parse_family_paragraph};
pub use pediatric::{format_pediatric_paragraph, parse_pediatric_paragraph};

use crate::models::{FamilyHistory, PediatricHistory};

/// A record persisted as a single paragraph.
pub trait HistoryParagraph: Sized {
    /// Render the record. Empty records give an empty string.
    fn to_paragraph(&self) -> String;

    /// Recover as much of the record as the paragraph allows.
    fn from_paragraph(paragraph: &str) -> Self;

    /// Decode then encode: the canonical form of a possibly hand-edited paragraph.
    fn normalize_paragraph(paragraph: &str) -> String {
        Self::from_paragraph(paragraph).to_paragraph()
    }
}

impl HistoryParagraph for PediatricHistory {
    fn to_paragraph(&self) -> String {
        format_pediatric_paragraph(self)
    }

    fn from_paragraph(paragraph: &str) -> Self {
        parse_pediatric_paragraph(paragraph)
    }
}

impl HistoryParagraph for FamilyHistory {
    fn to_paragraph(&self) -> String {
        format_family_paragraph(self)
    }

    fn from_paragraph(paragraph: &str) -> Self {
        parse_family_paragraph(paragraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_in_empty_out() {
        assert_eq!(PediatricHistory::default().to_paragraph(), "");
        assert_eq!(FamilyHistory::default().to_paragraph(), "");
        assert_eq!(PediatricHistory::from_paragraph(""), PediatricHistory::default());
        assert_eq!(FamilyHistory::from_paragraph(""), FamilyHistory::default());
    }

    #[test]
    fn test_unrelated_text_decodes_to_empty() {
        assert!(PediatricHistory::from_paragraph("RAS").is_empty());
        assert!(FamilyHistory::from_paragraph("Patient vu en consultation.").is_empty());
    }

    #[test]
    fn test_normalize_paragraph() {
        let hand_edited = "atcds médicaux:   Asthme  ";
        assert_eq!(
            PediatricHistory::normalize_paragraph(hand_edited),
            "ATCDS MÉDICAUX: Asthme"
        );
    }
}
