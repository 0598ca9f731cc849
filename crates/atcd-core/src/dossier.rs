//! Antecedents tab of the patient dossier.
//!
//! The form keeps the structured records while the clinician edits them. The
//! persistence API only ever sees paragraphs: they are decoded right after a
//! load and encoded right before a save.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FamilyHistory, PediatricHistory};
use crate::paragraph::HistoryParagraph;

/// Dossier errors.
#[derive(Error, Debug)]
pub enum DossierError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown patient category: {0}")]
    UnknownCategory(String),
}

pub type DossierResult<T> = Result<T, DossierError>;

/// Which antecedents tab applies to the patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatientCategory {
    Adult,
    Pediatric,
}

impl std::str::FromStr for PatientCategory {
    type Err = DossierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adult" | "adulte" => Ok(PatientCategory::Adult),
            "pediatric" | "pédiatrique" | "pediatrique" => Ok(PatientCategory::Pediatric),
            other => Err(DossierError::UnknownCategory(other.to_string())),
        }
    }
}

/// Antecedent columns as exchanged with the persistence API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AntecedentsPayload {
    #[serde(rename = "atcdsPediatriques", default, skip_serializing_if = "Option::is_none")]
    pub pediatric: Option<String>,
    #[serde(rename = "atcdsFamiliaux", default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(rename = "atcdsAdultes", default, skip_serializing_if = "Option::is_none")]
    pub adult: Option<String>,
}

impl AntecedentsPayload {
    pub fn from_json(json: &str) -> DossierResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> DossierResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Form state of the antecedents tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AntecedentsForm {
    #[serde(rename = "categorie")]
    pub category: PatientCategory,
    #[serde(rename = "pediatrique", default)]
    pub pediatric: PediatricHistory,
    #[serde(rename = "familial", default)]
    pub family: FamilyHistory,
    /// Adult history is plain text, stored verbatim
    #[serde(rename = "adulte", default)]
    pub adult: String,
}

impl AntecedentsForm {
    /// Blank form for a new patient.
    pub fn new(category: PatientCategory) -> Self {
        Self {
            category,
            pediatric: PediatricHistory::default(),
            family: FamilyHistory::default(),
            adult: String::new(),
        }
    }

    /// Pre-fill the form from a load response.
    ///
    /// Decoding is advisory: whatever the paragraphs do not yield stays empty
    /// for the clinician to fill in.
    pub fn from_payload(category: PatientCategory, payload: &AntecedentsPayload) -> Self {
        let pediatric = match (category, payload.pediatric.as_deref()) {
            (PatientCategory::Pediatric, Some(paragraph)) => {
                PediatricHistory::from_paragraph(paragraph)
            }
            _ => PediatricHistory::default(),
        };
        let family = payload
            .family
            .as_deref()
            .map(FamilyHistory::from_paragraph)
            .unwrap_or_default();

        tracing::debug!(
            ?category,
            pediatric_len = payload.pediatric.as_ref().map_or(0, String::len),
            family_len = payload.family.as_ref().map_or(0, String::len),
            "Loaded antecedents"
        );

        Self {
            category,
            pediatric,
            family,
            adult: payload.adult.clone().unwrap_or_default(),
        }
    }

    /// Build the save request body.
    ///
    /// The pediatric column is only written for pediatric patients. Empty
    /// records are sent as empty strings so that a cleared form clears the
    /// stored column.
    pub fn to_payload(&self) -> AntecedentsPayload {
        let pediatric = match self.category {
            PatientCategory::Pediatric => Some(self.pediatric.to_paragraph()),
            PatientCategory::Adult => None,
        };
        let family = self.family.to_paragraph();

        tracing::debug!(
            category = ?self.category,
            pediatric_len = pediatric.as_ref().map_or(0, String::len),
            family_len = family.len(),
            "Encoded antecedents for save"
        );

        AntecedentsPayload {
            pediatric,
            family: Some(family),
            adult: Some(self.adult.clone()),
        }
    }

    pub fn from_json(json: &str) -> DossierResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> DossierResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
