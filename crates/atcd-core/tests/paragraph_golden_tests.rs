//! Golden tests for the history paragraphs.
//!
//! Each case decodes a stored paragraph and re-encodes it; the result must
//! match the canonical paragraph.

use atcd_core::models::{
    BirthState, Breastfeeding, Consanguinity, CurrentDiet, Delivery, DeliveryCircumstance,
    FamilyHistory, FirstFood, InfantDiet, Language, Meals, Parent, PediatricHistory, Pregnancy,
    PsychomotorDevelopment, Supplement, Supplements, Walking,
};
use atcd_core::paragraph::HistoryParagraph;

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    stored: &'static str,
    canonical: &'static str,
}

fn pediatric_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "preterm-birth",
            stored: "GROSSESSE ET NAISSANCE: Accouchement prématuré à 34 SA; État à la naissance: Apgar 1min 8, 2200g",
            canonical: "GROSSESSE ET NAISSANCE: Accouchement prématuré à 34 SA; État à la naissance: Apgar 1min 8, 2200g",
        },
        GoldenCase {
            id: "lowercase-headers-and-labels",
            stored: "grossesse et naissance: grossesse suivi, traitements: fer. atcds médicaux: Asthme",
            canonical: "GROSSESSE ET NAISSANCE: Grossesse suivi, Traitements: fer. ATCDS MÉDICAUX: Asthme",
        },
        GoldenCase {
            id: "spaced-units",
            stored: "GROSSESSE ET NAISSANCE: État à la naissance: 3500 g, Taille 50 cm, PC 35 CM",
            canonical: "GROSSESSE ET NAISSANCE: État à la naissance: 3500g, Taille 50cm, PC 35cm",
        },
        GoldenCase {
            id: "unaccented-circumstance",
            stored: "GROSSESSE ET NAISSANCE: Accouchement à terme, Circonstances: cesarienne, Indication de la césarienne: siège",
            canonical: "GROSSESSE ET NAISSANCE: Accouchement à terme, Circonstances: césarienne, Indication de la césarienne: siège",
        },
        GoldenCase {
            id: "months-unit-added",
            stored: "DÉVELOPPEMENT PSYCHOMOTEUR: Marche: 13, Premiers mots: 11 mois",
            canonical: "DÉVELOPPEMENT PSYCHOMOTEUR: Marche: 13 mois, Premiers mots: 11 mois",
        },
        GoldenCase {
            id: "medical-history-verbatim",
            stored: "ATCDS MÉDICAUX: Bronchiolite à 3 mois, hospitalisée. Pas d'allergie.",
            canonical: "ATCDS MÉDICAUX: Bronchiolite à 3 mois, hospitalisée. Pas d'allergie.",
        },
        GoldenCase {
            id: "sections-reordered",
            stored: "ATCDS MÉDICAUX: Otites. GROSSESSE ET NAISSANCE: Grossesse non suivi",
            canonical: "GROSSESSE ET NAISSANCE: Grossesse non suivi. ATCDS MÉDICAUX: Otites",
        },
        GoldenCase {
            id: "free-text-only",
            stored: "RAS",
            canonical: "",
        },
    ]
}

fn family_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "complete",
            stored: "Père: Âge: 45 ans, Profession: ingénieur, Origine: Maroc. Mère: Âge: 38 ans. Consanguinité: oui, Degré: 1er degré. Pathologies personnelles: Asthme. Fratrie: Nombre: 2, Informations: deux sœurs",
            canonical: "Père: Âge: 45 ans, Profession: ingénieur, Origine: Maroc. Mère: Âge: 38 ans. Consanguinité: oui, Degré: 1er degré. Pathologies personnelles: Asthme. Fratrie: Nombre: 2, Informations: deux sœurs",
        },
        GoldenCase {
            id: "comma-truncates-profession",
            stored: "Père: Profession: ingénieur, senior",
            canonical: "Père: Profession: ingénieur",
        },
        GoldenCase {
            id: "degree-dropped-without-consanguinity",
            stored: "Consanguinité: non, Degré: 2e degré",
            canonical: "Consanguinité: non",
        },
        GoldenCase {
            id: "age-unit-added",
            stored: "Mère: Âge: 30",
            canonical: "Mère: Âge: 30 ans",
        },
        GoldenCase {
            id: "age-unit-uppercase",
            stored: "Père: Âge: 50 ANS",
            canonical: "Père: Âge: 50 ans",
        },
        GoldenCase {
            id: "sections-reordered",
            stored: "Fratrie: Nombre: 1. Père: Profession: boulanger",
            canonical: "Père: Profession: boulanger. Fratrie: Nombre: 1",
        },
        GoldenCase {
            id: "unaccented-header-is-not-recognized",
            stored: "Consanguinite: OUI",
            canonical: "",
        },
    ]
}

#[test]
fn test_pediatric_golden_cases() {
    for case in pediatric_golden_cases() {
        assert_eq!(
            PediatricHistory::normalize_paragraph(case.stored),
            case.canonical,
            "Case {}: canonical paragraph mismatch",
            case.id
        );
    }
}

#[test]
fn test_family_golden_cases() {
    for case in family_golden_cases() {
        assert_eq!(
            FamilyHistory::normalize_paragraph(case.stored),
            case.canonical,
            "Case {}: canonical paragraph mismatch",
            case.id
        );
    }
}

#[test]
fn test_canonical_paragraphs_are_fixpoints() {
    for case in pediatric_golden_cases() {
        assert_eq!(
            PediatricHistory::normalize_paragraph(case.canonical),
            case.canonical,
            "Case {}: canonical paragraph is not stable",
            case.id
        );
    }
    for case in family_golden_cases() {
        assert_eq!(
            FamilyHistory::normalize_paragraph(case.canonical),
            case.canonical,
            "Case {}: canonical paragraph is not stable",
            case.id
        );
    }
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn complete_pediatric_record() -> PediatricHistory {
    PediatricHistory {
        pregnancy: Pregnancy {
            followed: Some(true),
            living_conditions: text("bonnes"),
            monitoring_notes: text("mensuelle"),
            additional_exams: text("échographies normales"),
            treatments: text("fer"),
        },
        delivery: Delivery {
            full_term: Some(true),
            gestational_weeks: None,
            circumstances: Some(DeliveryCircumstance::Cesarean),
            cesarean_indication: text("siège"),
        },
        birth_state: BirthState {
            apgar_1min: text("9"),
            apgar_5min: text("10"),
            weight_grams: text("3400"),
            height_cm: text("50"),
            head_circumference_cm: text("34"),
        },
        infant_diet: InfantDiet {
            first_food: Some(FirstFood::BreastMilk),
            breastfeeding: Breastfeeding {
                modalities: text("à la demande"),
                duration: text("6 mois"),
            },
            current_diet: CurrentDiet {
                milk_type: text("2e âge"),
                gluten: text("6 mois"),
                meals: Meals {
                    count: text("5"),
                    ..Default::default()
                },
                ..Default::default()
            },
            supplements: Supplements {
                vitamin_d: Supplement {
                    product_name: text("ZymaD"),
                    dose: text("4 gouttes"),
                },
                ..Default::default()
            },
            ..Default::default()
        },
        psychomotor: PsychomotorDevelopment {
            walking: Walking {
                age_months: text("13"),
                notes: None,
            },
            language: Language {
                first_words_age_months: text("11"),
                ..Default::default()
            },
            behavior: text("calme"),
            ..Default::default()
        },
        medical_history: text("Bronchiolite à 3 mois"),
    }
}

#[test]
fn test_complete_pediatric_record() {
    let record = complete_pediatric_record();
    let paragraph = record.to_paragraph();

    assert_eq!(
        paragraph,
        "GROSSESSE ET NAISSANCE: Grossesse suivi, Conditions de vie: bonnes, Surveillance: mensuelle, \
         Examens complémentaires: échographies normales, Traitements: fer; \
         Accouchement à terme, Circonstances: césarienne, Indication de la césarienne: siège; \
         État à la naissance: Apgar 1min 9, Apgar 5min 10, 3400g, Taille 50cm, PC 34cm. \
         RÉGIME DU NOURRISSON: Alimentation initiale: allaitement maternel; \
         Allaitement: Modalités: à la demande, Durée: 6 mois; Type de lait: 2e âge; \
         Diversification: Gluten: 6 mois; Repas: Nombre: 5; \
         Suppléments: Vitamine D: ZymaD (4 gouttes). \
         DÉVELOPPEMENT PSYCHOMOTEUR: Marche: 13 mois, Premiers mots: 11 mois, Comportement: calme. \
         ATCDS MÉDICAUX: Bronchiolite à 3 mois"
    );
    assert_eq!(PediatricHistory::from_paragraph(&paragraph), record);
}

#[test]
fn test_idempotent_re_encode() {
    let paragraph = complete_pediatric_record().to_paragraph();
    let once = PediatricHistory::normalize_paragraph(&paragraph);
    assert_eq!(once, paragraph);
    assert_eq!(PediatricHistory::normalize_paragraph(&once), once);
}

#[test]
fn test_empty_in_empty_out() {
    assert_eq!(PediatricHistory::default().to_paragraph(), "");
    assert_eq!(FamilyHistory::default().to_paragraph(), "");
    assert!(PediatricHistory::from_paragraph("").is_empty());
    assert!(FamilyHistory::from_paragraph("").is_empty());
}

#[test]
fn test_section_omission() {
    let record = PediatricHistory {
        psychomotor: PsychomotorDevelopment {
            behavior: text("calme"),
            ..Default::default()
        },
        ..Default::default()
    };
    let paragraph = record.to_paragraph();

    assert_eq!(paragraph, "DÉVELOPPEMENT PSYCHOMOTEUR: Comportement: calme");
    assert!(!paragraph.contains("GROSSESSE ET NAISSANCE:"));
    assert!(!paragraph.contains("RÉGIME DU NOURRISSON:"));
    assert!(!paragraph.contains("ATCDS MÉDICAUX:"));
}

#[test]
fn test_boolean_round_trip() {
    for followed in [Some(true), Some(false), None] {
        for full_term in [Some(true), Some(false), None] {
            let record = PediatricHistory {
                pregnancy: Pregnancy {
                    followed,
                    treatments: text("aucun"),
                    ..Default::default()
                },
                delivery: Delivery {
                    full_term,
                    ..Default::default()
                },
                ..Default::default()
            };
            let decoded = PediatricHistory::from_paragraph(&record.to_paragraph());
            assert_eq!(decoded.pregnancy.followed, followed);
            assert_eq!(decoded.delivery.full_term, full_term);
        }
    }
}

#[test]
fn test_unit_stripping() {
    let record = PediatricHistory::from_paragraph(
        "GROSSESSE ET NAISSANCE: Accouchement prématuré à 32 SA; État à la naissance: 1800g, Taille 42cm, PC 30cm. \
         DÉVELOPPEMENT PSYCHOMOTEUR: Marche: 15 mois",
    );
    assert_eq!(record.delivery.gestational_weeks.as_deref(), Some("32"));
    assert_eq!(record.birth_state.weight_grams.as_deref(), Some("1800"));
    assert_eq!(record.birth_state.height_cm.as_deref(), Some("42"));
    assert_eq!(record.birth_state.head_circumference_cm.as_deref(), Some("30"));
    assert_eq!(record.psychomotor.walking.age_months.as_deref(), Some("15"));

    let family = FamilyHistory::from_paragraph("Père: Âge: 45 ans");
    assert_eq!(family.father.age.as_deref(), Some("45"));
}

#[test]
fn test_comma_truncation() {
    let record = FamilyHistory {
        father: Parent {
            profession: text("ingénieur, senior"),
            ..Default::default()
        },
        ..Default::default()
    };
    let paragraph = record.to_paragraph();
    assert_eq!(paragraph, "Père: Profession: ingénieur, senior");

    let decoded = FamilyHistory::from_paragraph(&paragraph);
    assert_eq!(decoded.father.profession.as_deref(), Some("ingénieur"));
}

#[test]
fn test_consanguinity_labels() {
    let yes = FamilyHistory::from_paragraph("Consanguinité: oui");
    assert_eq!(yes.consanguinity, Some(Consanguinity::Yes));

    let no = FamilyHistory::from_paragraph("Consanguinité: Non");
    assert_eq!(no.consanguinity, Some(Consanguinity::No));

    let unknown = FamilyHistory::from_paragraph("Consanguinité: peut-être");
    assert_eq!(unknown.consanguinity, None);
}
