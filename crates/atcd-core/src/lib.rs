//! ATCD Core Library
//!
//! Structured antecedents (medical history) for the patient dossier, persisted
//! as human-readable French paragraphs.
//!
//! # Architecture
//!
//! ```text
//!   load response ──► parse_*_paragraph ──► AntecedentsForm (editable)
//!                                                   │
//!                                           clinician edits
//!                                                   │
//!   save request  ◄── format_*_paragraph ◄──────────┘
//! ```
//!
//! # Core Principle
//!
//! **The paragraph is the system of record.** Encoding is deterministic;
//! decoding is best-effort and never fails.
//!
//! # Modules
//!
//! - [`models`]: Pediatric and family history records
//! - [`paragraph`]: Paragraph encoder/decoder
//! - [`dossier`]: Load/save call sites of the antecedents form

pub mod dossier;
pub mod models;
pub mod paragraph;

// Re-export commonly used types
pub use dossier::{AntecedentsForm, AntecedentsPayload, DossierError, PatientCategory};
pub use models::{
    Consanguinity, DeliveryCircumstance, FamilyHistory, FirstFood, Parent, PediatricHistory,
};
pub use paragraph::{
    format_family_paragraph, format_pediatric_paragraph, parse_family_paragraph,
    parse_pediatric_paragraph, HistoryParagraph,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AtcdError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AtcdError {
    fn from(e: serde_json::Error) -> Self {
        AtcdError::SerializationError(e.to_string())
    }
}

impl From<DossierError> for AtcdError {
    fn from(e: DossierError) -> Self {
        match e {
            DossierError::Json(e) => AtcdError::SerializationError(e.to_string()),
            DossierError::UnknownCategory(_) => AtcdError::InvalidInput(e.to_string()),
        }
    }
}

// =========================================================================
// Paragraph Functions (exported to FFI)
// =========================================================================

/// Encode a pediatric record (JSON) as its paragraph.
#[uniffi::export]
pub fn format_pediatric_history(record_json: String) -> Result<String, AtcdError> {
    let record: PediatricHistory = serde_json::from_str(&record_json)?;
    Ok(record.to_paragraph())
}

/// Decode a pediatric paragraph into a record (JSON).
#[uniffi::export]
pub fn parse_pediatric_history(paragraph: String) -> Result<String, AtcdError> {
    let record = PediatricHistory::from_paragraph(&paragraph);
    Ok(serde_json::to_string(&record)?)
}

/// Encode a family record (JSON) as its paragraph.
#[uniffi::export]
pub fn format_family_history(record_json: String) -> Result<String, AtcdError> {
    let record: FamilyHistory = serde_json::from_str(&record_json)?;
    Ok(record.to_paragraph())
}

/// Decode a family paragraph into a record (JSON).
#[uniffi::export]
pub fn parse_family_history(paragraph: String) -> Result<String, AtcdError> {
    let record = FamilyHistory::from_paragraph(&paragraph);
    Ok(serde_json::to_string(&record)?)
}

// =========================================================================
// Dossier Functions (exported to FFI)
// =========================================================================

/// Build the antecedents form from a load response.
///
/// `category` is `adult` or `pediatric`; the result is the form as JSON.
#[uniffi::export]
pub fn load_antecedents(category: String, payload_json: String) -> Result<String, AtcdError> {
    let category: PatientCategory = category.parse()?;
    let payload = AntecedentsPayload::from_json(&payload_json)?;
    let form = AntecedentsForm::from_payload(category, &payload);
    tracing::debug!(?category, "Antecedents form ready");
    Ok(form.to_json()?)
}

/// Build the save request body from the form (JSON).
#[uniffi::export]
pub fn save_antecedents(form_json: String) -> Result<String, AtcdError> {
    let form = AntecedentsForm::from_json(&form_json)?;
    let payload = form.to_payload();
    tracing::debug!(category = ?form.category, "Antecedents payload ready");
    Ok(payload.to_json()?)
}
