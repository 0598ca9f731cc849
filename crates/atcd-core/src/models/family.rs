//! Family history (ATCDs familiaux) models.

use serde::{Deserialize, Serialize};

use super::is_blank;

/// One parent's identity line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Parent {
    /// Age in years, as typed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(rename = "origine", default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
}

impl Parent {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.age) && is_blank(&self.profession) && is_blank(&self.country_of_origin)
    }
}

/// Whether the parents are related.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Consanguinity {
    Yes,
    No,
}

impl Consanguinity {
    pub const ALL: [Consanguinity; 2] = [Consanguinity::Yes, Consanguinity::No];

    /// Label written in the paragraph.
    pub fn label(self) -> &'static str {
        match self {
            Consanguinity::Yes => "oui",
            Consanguinity::No => "non",
        }
    }
}

/// Structured family and consanguinity intake.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FamilyHistory {
    #[serde(rename = "pere", default, skip_serializing_if = "Parent::is_empty")]
    pub father: Parent,
    #[serde(rename = "mere", default, skip_serializing_if = "Parent::is_empty")]
    pub mother: Parent,
    #[serde(rename = "consanguinite", default, skip_serializing_if = "Option::is_none")]
    pub consanguinity: Option<Consanguinity>,
    /// Only meaningful when consanguinity is `Yes`
    #[serde(rename = "degreConsanguinite", default, skip_serializing_if = "Option::is_none")]
    pub consanguinity_degree: Option<String>,
    #[serde(
        rename = "pathologiesPersonnelles",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub personal_pathologies: Option<String>,
    #[serde(rename = "nombreFratrie", default, skip_serializing_if = "Option::is_none")]
    pub siblings_count: Option<String>,
    #[serde(rename = "infosFratrie", default, skip_serializing_if = "Option::is_none")]
    pub siblings_info: Option<String>,
}

impl FamilyHistory {
    pub fn is_empty(&self) -> bool {
        self.father.is_empty()
            && self.mother.is_empty()
            && self.consanguinity.is_none()
            && is_blank(&self.consanguinity_degree)
            && is_blank(&self.personal_pathologies)
            && is_blank(&self.siblings_count)
            && is_blank(&self.siblings_info)
    }
}
