//! Pediatric history (ATCDs pédiatriques) models.
//!
//! Every leaf is optional. The JSON shape matches the dossier form state, with
//! French keys; absent leaves and empty groups are omitted on serialization.

use serde::{Deserialize, Serialize};

use super::is_blank;

/// Structured pediatric intake: pregnancy, birth, diet, development, medical history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PediatricHistory {
    #[serde(rename = "grossesse", default, skip_serializing_if = "Pregnancy::is_empty")]
    pub pregnancy: Pregnancy,
    #[serde(rename = "accouchement", default, skip_serializing_if = "Delivery::is_empty")]
    pub delivery: Delivery,
    #[serde(rename = "etatNaissance", default, skip_serializing_if = "BirthState::is_empty")]
    pub birth_state: BirthState,
    #[serde(rename = "regimeNourrisson", default, skip_serializing_if = "InfantDiet::is_empty")]
    pub infant_diet: InfantDiet,
    #[serde(
        rename = "developpementPsychomoteur",
        default,
        skip_serializing_if = "PsychomotorDevelopment::is_empty"
    )]
    pub psychomotor: PsychomotorDevelopment,
    /// Free-text medical history narrative
    #[serde(rename = "atcdsMedicaux", default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl PediatricHistory {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.pregnancy.is_empty()
            && self.delivery.is_empty()
            && self.birth_state.is_empty()
            && self.infant_diet.is_empty()
            && self.psychomotor.is_empty()
            && is_blank(&self.medical_history)
    }
}

/// Pregnancy follow-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pregnancy {
    /// Whether the pregnancy was medically followed
    #[serde(rename = "suivie", default, skip_serializing_if = "Option::is_none")]
    pub followed: Option<bool>,
    #[serde(rename = "conditionsVie", default, skip_serializing_if = "Option::is_none")]
    pub living_conditions: Option<String>,
    #[serde(rename = "surveillance", default, skip_serializing_if = "Option::is_none")]
    pub monitoring_notes: Option<String>,
    #[serde(rename = "examensComplementaires", default, skip_serializing_if = "Option::is_none")]
    pub additional_exams: Option<String>,
    #[serde(rename = "traitements", default, skip_serializing_if = "Option::is_none")]
    pub treatments: Option<String>,
}

impl Pregnancy {
    pub fn is_empty(&self) -> bool {
        self.followed.is_none()
            && is_blank(&self.living_conditions)
            && is_blank(&self.monitoring_notes)
            && is_blank(&self.additional_exams)
            && is_blank(&self.treatments)
    }
}

/// How the delivery went.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryCircumstance {
    Vaginal,
    PerinatalAnoxia,
    Cesarean,
}

impl DeliveryCircumstance {
    pub const ALL: [DeliveryCircumstance; 3] = [
        DeliveryCircumstance::Vaginal,
        DeliveryCircumstance::PerinatalAnoxia,
        DeliveryCircumstance::Cesarean,
    ];

    /// Label written in the paragraph.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryCircumstance::Vaginal => "voie basse",
            DeliveryCircumstance::PerinatalAnoxia => "anoxie périnatale",
            DeliveryCircumstance::Cesarean => "césarienne",
        }
    }
}

/// Delivery term and circumstances.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Delivery {
    #[serde(rename = "aTerme", default, skip_serializing_if = "Option::is_none")]
    pub full_term: Option<bool>,
    /// Weeks of amenorrhea, only meaningful when preterm
    #[serde(rename = "semainesAmenorrhee", default, skip_serializing_if = "Option::is_none")]
    pub gestational_weeks: Option<String>,
    #[serde(rename = "circonstances", default, skip_serializing_if = "Option::is_none")]
    pub circumstances: Option<DeliveryCircumstance>,
    /// Only meaningful for a cesarean
    #[serde(rename = "indicationCesarienne", default, skip_serializing_if = "Option::is_none")]
    pub cesarean_indication: Option<String>,
}

impl Delivery {
    pub fn is_empty(&self) -> bool {
        self.full_term.is_none()
            && is_blank(&self.gestational_weeks)
            && self.circumstances.is_none()
            && is_blank(&self.cesarean_indication)
    }
}

/// Measurements at birth, kept as the strings the clinician typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BirthState {
    #[serde(rename = "apgarMin", default, skip_serializing_if = "Option::is_none")]
    pub apgar_1min: Option<String>,
    #[serde(rename = "apgar5Min", default, skip_serializing_if = "Option::is_none")]
    pub apgar_5min: Option<String>,
    #[serde(rename = "poids", default, skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<String>,
    #[serde(rename = "taille", default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<String>,
    #[serde(rename = "perimetreCranien", default, skip_serializing_if = "Option::is_none")]
    pub head_circumference_cm: Option<String>,
}

impl BirthState {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.apgar_1min)
            && is_blank(&self.apgar_5min)
            && is_blank(&self.weight_grams)
            && is_blank(&self.height_cm)
            && is_blank(&self.head_circumference_cm)
    }
}

/// First food given to the infant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FirstFood {
    BreastMilk,
    Formula,
}

impl FirstFood {
    pub const ALL: [FirstFood; 2] = [FirstFood::BreastMilk, FirstFood::Formula];

    /// Label written in the paragraph.
    pub fn label(self) -> &'static str {
        match self {
            FirstFood::BreastMilk => "allaitement maternel",
            FirstFood::Formula => "lait artificiel",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Breastfeeding {
    #[serde(rename = "modalites", default, skip_serializing_if = "Option::is_none")]
    pub modalities: Option<String>,
    #[serde(rename = "duree", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Breastfeeding {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.modalities) && is_blank(&self.duration)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormulaFeeding {
    #[serde(rename = "introductionProteines", default, skip_serializing_if = "Option::is_none")]
    pub protein_introduction_date: Option<String>,
}

impl FormulaFeeding {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.protein_introduction_date)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Meals {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(rename = "horaires", default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(rename = "duree", default, skip_serializing_if = "Option::is_none")]
    pub meal_duration: Option<String>,
    #[serde(rename = "volume", default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(rename = "composition", default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
}

impl Meals {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.count)
            && is_blank(&self.schedule)
            && is_blank(&self.meal_duration)
            && is_blank(&self.volume)
            && is_blank(&self.composition)
    }
}

/// Diet at the time of the consultation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentDiet {
    #[serde(rename = "typeLait", default, skip_serializing_if = "Option::is_none")]
    pub milk_type: Option<String>,
    #[serde(rename = "gluten", default, skip_serializing_if = "Option::is_none")]
    pub gluten: Option<String>,
    #[serde(rename = "legumes", default, skip_serializing_if = "Option::is_none")]
    pub vegetables: Option<String>,
    #[serde(rename = "fruits", default, skip_serializing_if = "Option::is_none")]
    pub fruits: Option<String>,
    #[serde(rename = "viandes", default, skip_serializing_if = "Option::is_none")]
    pub meats: Option<String>,
    #[serde(rename = "repas", default, skip_serializing_if = "Meals::is_empty")]
    pub meals: Meals,
}

impl CurrentDiet {
    /// True when none of the diversification foods is filled in.
    pub fn diversification_is_empty(&self) -> bool {
        is_blank(&self.gluten)
            && is_blank(&self.vegetables)
            && is_blank(&self.fruits)
            && is_blank(&self.meats)
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.milk_type) && self.diversification_is_empty() && self.meals.is_empty()
    }
}

/// A supplement product and its dose.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Supplement {
    #[serde(rename = "produit", default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(rename = "dose", default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
}

impl Supplement {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.product_name) && is_blank(&self.dose)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Supplements {
    #[serde(rename = "vitamineD", default, skip_serializing_if = "Supplement::is_empty")]
    pub vitamin_d: Supplement,
    #[serde(rename = "vitamineK", default, skip_serializing_if = "Supplement::is_empty")]
    pub vitamin_k: Supplement,
    #[serde(rename = "fluor", default, skip_serializing_if = "Supplement::is_empty")]
    pub fluoride: Supplement,
    #[serde(rename = "fer", default, skip_serializing_if = "Supplement::is_empty")]
    pub iron: Supplement,
}

impl Supplements {
    pub fn is_empty(&self) -> bool {
        self.vitamin_d.is_empty()
            && self.vitamin_k.is_empty()
            && self.fluoride.is_empty()
            && self.iron.is_empty()
    }
}

/// Infant diet (régime du nourrisson).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InfantDiet {
    #[serde(rename = "premierAliment", default, skip_serializing_if = "Option::is_none")]
    pub first_food: Option<FirstFood>,
    #[serde(rename = "allaitement", default, skip_serializing_if = "Breastfeeding::is_empty")]
    pub breastfeeding: Breastfeeding,
    #[serde(rename = "laitArtificiel", default, skip_serializing_if = "FormulaFeeding::is_empty")]
    pub formula: FormulaFeeding,
    #[serde(rename = "regimeActuel", default, skip_serializing_if = "CurrentDiet::is_empty")]
    pub current_diet: CurrentDiet,
    #[serde(rename = "supplements", default, skip_serializing_if = "Supplements::is_empty")]
    pub supplements: Supplements,
}

impl InfantDiet {
    pub fn is_empty(&self) -> bool {
        self.first_food.is_none()
            && self.breastfeeding.is_empty()
            && self.formula.is_empty()
            && self.current_diet.is_empty()
            && self.supplements.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Walking {
    #[serde(rename = "ageMois", default, skip_serializing_if = "Option::is_none")]
    pub age_months: Option<String>,
    #[serde(rename = "remarques", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Walking {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.age_months) && is_blank(&self.notes)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Language {
    #[serde(rename = "premiersMotsMois", default, skip_serializing_if = "Option::is_none")]
    pub first_words_age_months: Option<String>,
    #[serde(rename = "phrasesMois", default, skip_serializing_if = "Option::is_none")]
    pub sentences_age_months: Option<String>,
    #[serde(rename = "remarques", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Language {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.first_words_age_months)
            && is_blank(&self.sentences_age_months)
            && is_blank(&self.notes)
    }
}

/// Psychomotor milestones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PsychomotorDevelopment {
    #[serde(rename = "marche", default, skip_serializing_if = "Walking::is_empty")]
    pub walking: Walking,
    #[serde(rename = "langage", default, skip_serializing_if = "Language::is_empty")]
    pub language: Language,
    #[serde(rename = "acquisitionsMotrices", default, skip_serializing_if = "Option::is_none")]
    pub motor_milestones: Option<String>,
    #[serde(
        rename = "acquisitionsIntellectuelles",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub intellectual_milestones: Option<String>,
    #[serde(rename = "comportement", default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    #[serde(rename = "remarques", default, skip_serializing_if = "Option::is_none")]
    pub general_notes: Option<String>,
}

impl PsychomotorDevelopment {
    pub fn is_empty(&self) -> bool {
        self.walking.is_empty()
            && self.language.is_empty()
            && is_blank(&self.motor_milestones)
            && is_blank(&self.intellectual_milestones)
            && is_blank(&self.behavior)
            && is_blank(&self.general_notes)
    }
}
