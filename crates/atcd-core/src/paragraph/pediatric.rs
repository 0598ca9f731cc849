//! Pediatric history paragraph.
//!
//! Section order is fixed: pregnancy and birth, infant diet, psychomotor
//! development, medical history. Each section has its own header pattern and
//! its own field battery so that a wording change in one section cannot move
//! the boundaries of another.

use std::sync::LazyLock;

use regex::Regex;

use super::grammar::{
    capture_section, join_present, literal, match_label, nested, phrase, section,
    section_pattern, strip_unit, Field, Fragments, Scope, GROUP_SEPARATOR, SECTION_SEPARATOR,
};
use crate::models::{
    present, BirthState, Breastfeeding, CurrentDiet, Delivery, DeliveryCircumstance, FirstFood,
    FormulaFeeding, InfantDiet, Language, Meals, PediatricHistory, PsychomotorDevelopment,
    Pregnancy, Supplement, Supplements, Walking,
};

pub const PREGNANCY_AND_BIRTH_HEADER: &str = "GROSSESSE ET NAISSANCE:";
pub const INFANT_DIET_HEADER: &str = "RÉGIME DU NOURRISSON:";
pub const PSYCHOMOTOR_HEADER: &str = "DÉVELOPPEMENT PSYCHOMOTEUR:";
pub const MEDICAL_HISTORY_HEADER: &str = "ATCDS MÉDICAUX:";

const HEADERS: [&str; 4] = [
    PREGNANCY_AND_BIRTH_HEADER,
    INFANT_DIET_HEADER,
    PSYCHOMOTOR_HEADER,
    MEDICAL_HISTORY_HEADER,
];

// Pregnancy
const PREGNANCY_FOLLOWED: &str = "Grossesse suivi";
const PREGNANCY_NOT_FOLLOWED: &str = "Grossesse non suivi";
const LIVING_CONDITIONS: &str = "Conditions de vie";
const MONITORING: &str = "Surveillance";
const ADDITIONAL_EXAMS: &str = "Examens complémentaires";
const TREATMENTS: &str = "Traitements";

// Delivery
const FULL_TERM: &str = "Accouchement à terme";
const PRETERM: &str = "Accouchement prématuré";
const WEEKS_UNIT: &str = "SA";
const CIRCUMSTANCES: &str = "Circonstances";
const CESAREAN_INDICATION: &str = "Indication de la césarienne";

// Birth state
const BIRTH_STATE: &str = "État à la naissance";
const APGAR_1MIN: &str = "Apgar 1min";
const APGAR_5MIN: &str = "Apgar 5min";
const HEIGHT: &str = "Taille";
const HEAD_CIRCUMFERENCE: &str = "PC";
const WEIGHT_UNIT: &str = "g";
const LENGTH_UNIT: &str = "cm";

// Infant diet
const FIRST_FOOD: &str = "Alimentation initiale";
const BREASTFEEDING: &str = "Allaitement";
const MODALITIES: &str = "Modalités";
const DURATION: &str = "Durée";
const FORMULA: &str = "Lait artificiel";
const PROTEIN_INTRODUCTION: &str = "Introduction des protéines";
const MILK_TYPE: &str = "Type de lait";
const DIVERSIFICATION: &str = "Diversification";
const GLUTEN: &str = "Gluten";
const VEGETABLES: &str = "Légumes";
const FRUITS: &str = "Fruits";
const MEATS: &str = "Viandes";
const MEALS: &str = "Repas";
const MEAL_COUNT: &str = "Nombre";
const MEAL_SCHEDULE: &str = "Horaires";
const MEAL_VOLUME: &str = "Volume";
const MEAL_COMPOSITION: &str = "Composition";
const SUPPLEMENTS: &str = "Suppléments";
const VITAMIN_D: &str = "Vitamine D";
const VITAMIN_K: &str = "Vitamine K";
const FLUORIDE: &str = "Fluor";
const IRON: &str = "Fer";

// Psychomotor development
const WALKING: &str = "Marche";
const WALKING_NOTES: &str = "Remarques marche";
const FIRST_WORDS: &str = "Premiers mots";
const SENTENCES: &str = "Phrases";
const LANGUAGE_NOTES: &str = "Remarques langage";
const MOTOR_MILESTONES: &str = "Acquisitions motrices";
const INTELLECTUAL_MILESTONES: &str = "Acquisitions intellectuelles";
const BEHAVIOR: &str = "Comportement";
const GENERAL_NOTES: &str = "Remarques";
const AGE_UNIT: &str = "mois";

// =========================================================================
// Encoder
// =========================================================================

/// Render a pediatric record as its paragraph. Empty records give `""`.
pub fn format_pediatric_paragraph(record: &PediatricHistory) -> String {
    join_present(
        [
            section(PREGNANCY_AND_BIRTH_HEADER, encode_pregnancy_and_birth(record)),
            section(INFANT_DIET_HEADER, encode_infant_diet(&record.infant_diet)),
            section(PSYCHOMOTOR_HEADER, encode_psychomotor(&record.psychomotor)),
            section(
                MEDICAL_HISTORY_HEADER,
                present(&record.medical_history).map(str::to_string),
            ),
        ],
        SECTION_SEPARATOR,
    )
    .unwrap_or_default()
}

fn encode_pregnancy_and_birth(record: &PediatricHistory) -> Option<String> {
    join_present(
        [
            encode_pregnancy(&record.pregnancy),
            encode_delivery(&record.delivery),
            encode_birth_state(&record.birth_state),
        ],
        GROUP_SEPARATOR,
    )
}

fn encode_pregnancy(pregnancy: &Pregnancy) -> Option<String> {
    let mut group = Fragments::new();
    match pregnancy.followed {
        Some(true) => group.push(PREGNANCY_FOLLOWED),
        Some(false) => group.push(PREGNANCY_NOT_FOLLOWED),
        None => {}
    }
    group.labelled(LIVING_CONDITIONS, &pregnancy.living_conditions);
    group.labelled(MONITORING, &pregnancy.monitoring_notes);
    group.labelled(ADDITIONAL_EXAMS, &pregnancy.additional_exams);
    group.labelled(TREATMENTS, &pregnancy.treatments);
    group.join()
}

fn encode_delivery(delivery: &Delivery) -> Option<String> {
    let mut group = Fragments::new();
    match delivery.full_term {
        Some(true) => group.push(FULL_TERM),
        Some(false) => match present(&delivery.gestational_weeks) {
            Some(weeks) => group.push(format!("{PRETERM} à {weeks} {WEEKS_UNIT}")),
            None => group.push(PRETERM),
        },
        None => {}
    }
    if let Some(circumstances) = delivery.circumstances {
        group.push(format!("{CIRCUMSTANCES}: {}", circumstances.label()));
        if circumstances == DeliveryCircumstance::Cesarean {
            group.labelled(CESAREAN_INDICATION, &delivery.cesarean_indication);
        }
    }
    group.join()
}

fn encode_birth_state(birth: &BirthState) -> Option<String> {
    let mut group = Fragments::new();
    if let Some(apgar) = present(&birth.apgar_1min) {
        group.push(format!("{APGAR_1MIN} {apgar}"));
    }
    if let Some(apgar) = present(&birth.apgar_5min) {
        group.push(format!("{APGAR_5MIN} {apgar}"));
    }
    if let Some(weight) = present(&birth.weight_grams) {
        group.push(format!("{weight}{WEIGHT_UNIT}"));
    }
    if let Some(height) = present(&birth.height_cm) {
        group.push(format!("{HEIGHT} {height}{LENGTH_UNIT}"));
    }
    if let Some(head) = present(&birth.head_circumference_cm) {
        group.push(format!("{HEAD_CIRCUMFERENCE} {head}{LENGTH_UNIT}"));
    }
    group.join().map(|inner| format!("{BIRTH_STATE}: {inner}"))
}

fn encode_infant_diet(diet: &InfantDiet) -> Option<String> {
    let first_food = diet
        .first_food
        .map(|food| format!("{FIRST_FOOD}: {}", food.label()));

    let mut breastfeeding = Fragments::new();
    breastfeeding.labelled(MODALITIES, &diet.breastfeeding.modalities);
    breastfeeding.labelled(DURATION, &diet.breastfeeding.duration);

    let mut formula = Fragments::new();
    formula.labelled(PROTEIN_INTRODUCTION, &diet.formula.protein_introduction_date);

    let current = &diet.current_diet;
    let milk_type = present(&current.milk_type).map(|milk| format!("{MILK_TYPE}: {milk}"));

    let mut diversification = Fragments::new();
    diversification.labelled(GLUTEN, &current.gluten);
    diversification.labelled(VEGETABLES, &current.vegetables);
    diversification.labelled(FRUITS, &current.fruits);
    diversification.labelled(MEATS, &current.meats);

    let mut meals = Fragments::new();
    meals.labelled(MEAL_COUNT, &current.meals.count);
    meals.labelled(MEAL_SCHEDULE, &current.meals.schedule);
    meals.labelled(DURATION, &current.meals.meal_duration);
    meals.labelled(MEAL_VOLUME, &current.meals.volume);
    meals.labelled(MEAL_COMPOSITION, &current.meals.composition);

    let mut supplements = Fragments::new();
    for (label, supplement) in [
        (VITAMIN_D, &diet.supplements.vitamin_d),
        (VITAMIN_K, &diet.supplements.vitamin_k),
        (FLUORIDE, &diet.supplements.fluoride),
        (IRON, &diet.supplements.iron),
    ] {
        if let Some(value) = encode_supplement(supplement) {
            supplements.push(format!("{label}: {value}"));
        }
    }

    join_present(
        [
            first_food,
            nested(BREASTFEEDING, breastfeeding),
            nested(FORMULA, formula),
            milk_type,
            nested(DIVERSIFICATION, diversification),
            nested(MEALS, meals),
            nested(SUPPLEMENTS, supplements),
        ],
        GROUP_SEPARATOR,
    )
}

/// `product (dose)`, `product` or `(dose)`.
fn encode_supplement(supplement: &Supplement) -> Option<String> {
    match (present(&supplement.product_name), present(&supplement.dose)) {
        (Some(product), Some(dose)) => Some(format!("{product} ({dose})")),
        (Some(product), None) => Some(product.to_string()),
        (None, Some(dose)) => Some(format!("({dose})")),
        (None, None) => None,
    }
}

fn encode_psychomotor(development: &PsychomotorDevelopment) -> Option<String> {
    let mut group = Fragments::new();
    group.measured(WALKING, &development.walking.age_months, AGE_UNIT);
    group.labelled(WALKING_NOTES, &development.walking.notes);
    group.measured(FIRST_WORDS, &development.language.first_words_age_months, AGE_UNIT);
    group.measured(SENTENCES, &development.language.sentences_age_months, AGE_UNIT);
    group.labelled(LANGUAGE_NOTES, &development.language.notes);
    group.labelled(MOTOR_MILESTONES, &development.motor_milestones);
    group.labelled(INTELLECTUAL_MILESTONES, &development.intellectual_milestones);
    group.labelled(BEHAVIOR, &development.behavior);
    group.labelled(GENERAL_NOTES, &development.general_notes);
    group.join()
}

// =========================================================================
// Decoder
// =========================================================================

struct SectionPatterns {
    pregnancy_and_birth: Regex,
    infant_diet: Regex,
    psychomotor: Regex,
    medical_history: Regex,
}

static SECTIONS: LazyLock<SectionPatterns> = LazyLock::new(|| {
    let terminators: Vec<String> = HEADERS.iter().map(|h| literal(h)).collect();
    let terminators: Vec<&str> = terminators.iter().map(String::as_str).collect();
    let pattern = |header: &str| section_pattern(&literal(header), &terminators);

    SectionPatterns {
        pregnancy_and_birth: pattern(PREGNANCY_AND_BIRTH_HEADER),
        infant_diet: pattern(INFANT_DIET_HEADER),
        psychomotor: pattern(PSYCHOMOTOR_HEADER),
        medical_history: pattern(MEDICAL_HISTORY_HEADER),
    }
});

/// Recover a pediatric record from its paragraph. Missing pieces stay unset.
pub fn parse_pediatric_paragraph(paragraph: &str) -> PediatricHistory {
    let mut record = PediatricHistory::default();

    if let Some(body) = pregnancy_and_birth_section(paragraph) {
        record.pregnancy = decode_pregnancy(body);
        record.delivery = decode_delivery(body);
        record.birth_state = decode_birth_state(body);
    }
    if let Some(body) = infant_diet_section(paragraph) {
        record.infant_diet = decode_infant_diet(body);
    }
    if let Some(body) = psychomotor_section(paragraph) {
        record.psychomotor = decode_psychomotor(body);
    }
    record.medical_history = medical_history_section(paragraph).map(str::to_string);

    record
}

/// Body of the `GROSSESSE ET NAISSANCE:` section.
pub fn pregnancy_and_birth_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.pregnancy_and_birth, paragraph)
}

/// Body of the `RÉGIME DU NOURRISSON:` section.
pub fn infant_diet_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.infant_diet, paragraph)
}

/// Body of the `DÉVELOPPEMENT PSYCHOMOTEUR:` section.
pub fn psychomotor_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.psychomotor, paragraph)
}

/// Body of the `ATCDS MÉDICAUX:` section, kept verbatim.
pub fn medical_history_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.medical_history, paragraph)
}

struct PregnancyFields {
    not_followed: Regex,
    followed: Regex,
    living_conditions: Field,
    monitoring: Field,
    additional_exams: Field,
    treatments: Field,
}

static PREGNANCY: LazyLock<PregnancyFields> = LazyLock::new(|| PregnancyFields {
    not_followed: phrase(PREGNANCY_NOT_FOLLOWED),
    followed: phrase(PREGNANCY_FOLLOWED),
    living_conditions: Field::labelled(LIVING_CONDITIONS),
    monitoring: Field::labelled(MONITORING),
    additional_exams: Field::labelled(ADDITIONAL_EXAMS),
    treatments: Field::labelled(TREATMENTS),
});

pub fn decode_pregnancy(section: &str) -> Pregnancy {
    let fields = &*PREGNANCY;
    let followed = if fields.not_followed.is_match(section) {
        Some(false)
    } else if fields.followed.is_match(section) {
        Some(true)
    } else {
        None
    };

    Pregnancy {
        followed,
        living_conditions: fields.living_conditions.extract(section),
        monitoring_notes: fields.monitoring.extract(section),
        additional_exams: fields.additional_exams.extract(section),
        treatments: fields.treatments.extract(section),
    }
}

struct DeliveryFields {
    preterm: Regex,
    full_term: Regex,
    circumstances: Field,
    cesarean_indication: Field,
}

static DELIVERY: LazyLock<DeliveryFields> = LazyLock::new(|| DeliveryFields {
    preterm: Regex::new(&format!(
        r"(?i)(?:^|[,;:]\s*){}(?:\s+à\s+([^.,;]+))?",
        regex::escape(PRETERM)
    ))
    .unwrap(),
    full_term: phrase(FULL_TERM),
    circumstances: Field::labelled(CIRCUMSTANCES),
    cesarean_indication: Field::labelled(CESAREAN_INDICATION),
});

pub fn decode_delivery(section: &str) -> Delivery {
    let fields = &*DELIVERY;
    let mut delivery = Delivery::default();

    if let Some(caps) = fields.preterm.captures(section) {
        delivery.full_term = Some(false);
        delivery.gestational_weeks = caps
            .get(1)
            .map(|weeks| strip_unit(weeks.as_str().trim(), WEEKS_UNIT))
            .filter(|weeks| !weeks.is_empty())
            .map(str::to_string);
    } else if fields.full_term.is_match(section) {
        delivery.full_term = Some(true);
    }

    delivery.circumstances = fields.circumstances.find(section).and_then(|written| {
        match_label(written, &DeliveryCircumstance::ALL, DeliveryCircumstance::label)
    });
    if delivery.circumstances == Some(DeliveryCircumstance::Cesarean) {
        delivery.cesarean_indication = fields.cesarean_indication.extract(section);
    }

    delivery
}

struct BirthStateFields {
    scope: Scope,
    apgar_1min: Field,
    apgar_5min: Field,
    height: Field,
    head_circumference: Field,
    weight: Regex,
}

static BIRTH_STATE_FIELDS: LazyLock<BirthStateFields> = LazyLock::new(|| BirthStateFields {
    scope: Scope::new(BIRTH_STATE),
    apgar_1min: Field::prefixed(APGAR_1MIN),
    apgar_5min: Field::prefixed(APGAR_5MIN),
    height: Field::prefixed(HEIGHT),
    head_circumference: Field::prefixed(HEAD_CIRCUMFERENCE),
    weight: Regex::new(r"(?i)^[^.,;]+?\s*g$").unwrap(),
});

pub fn decode_birth_state(section: &str) -> BirthState {
    let fields = &*BIRTH_STATE_FIELDS;
    let Some(scope) = fields.scope.find(section) else {
        return BirthState::default();
    };

    BirthState {
        apgar_1min: fields.apgar_1min.extract(scope),
        apgar_5min: fields.apgar_5min.extract(scope),
        weight_grams: decode_weight(scope, &fields.weight),
        height_cm: fields.height.extract_measure(scope, LENGTH_UNIT),
        head_circumference_cm: fields.head_circumference.extract_measure(scope, LENGTH_UNIT),
    }
}

/// The weight has no label: it is the first unlabelled fragment ending in `g`.
fn decode_weight(scope: &str, weight: &Regex) -> Option<String> {
    scope
        .split(',')
        .map(str::trim)
        .filter(|fragment| !is_labelled_birth_fragment(fragment))
        .find(|fragment| weight.is_match(fragment))
        .map(|fragment| strip_unit(fragment, WEIGHT_UNIT))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn is_labelled_birth_fragment(fragment: &str) -> bool {
    let lower = fragment.to_lowercase();
    [APGAR_1MIN, APGAR_5MIN, HEIGHT, HEAD_CIRCUMFERENCE]
        .iter()
        .any(|label| lower.starts_with(&label.to_lowercase()))
}

struct InfantDietFields {
    first_food: Field,
    breastfeeding: Scope,
    modalities: Field,
    duration: Field,
    formula: Scope,
    protein_introduction: Field,
    milk_type: Field,
    diversification: Scope,
    gluten: Field,
    vegetables: Field,
    fruits: Field,
    meats: Field,
    meals: Scope,
    meal_count: Field,
    meal_schedule: Field,
    meal_volume: Field,
    meal_composition: Field,
    supplements: Scope,
    vitamin_d: Regex,
    vitamin_k: Regex,
    fluoride: Regex,
    iron: Regex,
}

fn supplement_pattern(label: &str) -> Regex {
    let pattern = format!(
        r"(?i)(?:^|[,;:]\s*){}\s*:\s*([^.,;(]*)(?:\(([^)]*)\))?",
        regex::escape(label)
    );
    Regex::new(&pattern).unwrap()
}

static INFANT_DIET: LazyLock<InfantDietFields> = LazyLock::new(|| InfantDietFields {
    first_food: Field::labelled(FIRST_FOOD),
    breastfeeding: Scope::new(BREASTFEEDING),
    modalities: Field::labelled(MODALITIES),
    duration: Field::labelled(DURATION),
    formula: Scope::new(FORMULA),
    protein_introduction: Field::labelled(PROTEIN_INTRODUCTION),
    milk_type: Field::labelled(MILK_TYPE),
    diversification: Scope::new(DIVERSIFICATION),
    gluten: Field::labelled(GLUTEN),
    vegetables: Field::labelled(VEGETABLES),
    fruits: Field::labelled(FRUITS),
    meats: Field::labelled(MEATS),
    meals: Scope::new(MEALS),
    meal_count: Field::labelled(MEAL_COUNT),
    meal_schedule: Field::labelled(MEAL_SCHEDULE),
    meal_volume: Field::labelled(MEAL_VOLUME),
    meal_composition: Field::labelled(MEAL_COMPOSITION),
    supplements: Scope::new(SUPPLEMENTS),
    vitamin_d: supplement_pattern(VITAMIN_D),
    vitamin_k: supplement_pattern(VITAMIN_K),
    fluoride: supplement_pattern(FLUORIDE),
    iron: supplement_pattern(IRON),
});

pub fn decode_infant_diet(section: &str) -> InfantDiet {
    let fields = &*INFANT_DIET;

    let first_food = fields
        .first_food
        .find(section)
        .and_then(|written| match_label(written, &FirstFood::ALL, FirstFood::label));

    let breastfeeding = fields
        .breastfeeding
        .find(section)
        .map(|group| Breastfeeding {
            modalities: fields.modalities.extract(group),
            duration: fields.duration.extract(group),
        })
        .unwrap_or_default();

    let formula = fields
        .formula
        .find(section)
        .map(|group| FormulaFeeding {
            protein_introduction_date: fields.protein_introduction.extract(group),
        })
        .unwrap_or_default();

    let mut current_diet = CurrentDiet {
        milk_type: fields.milk_type.extract(section),
        ..Default::default()
    };
    if let Some(group) = fields.diversification.find(section) {
        current_diet.gluten = fields.gluten.extract(group);
        current_diet.vegetables = fields.vegetables.extract(group);
        current_diet.fruits = fields.fruits.extract(group);
        current_diet.meats = fields.meats.extract(group);
    }
    if let Some(group) = fields.meals.find(section) {
        current_diet.meals = Meals {
            count: fields.meal_count.extract(group),
            schedule: fields.meal_schedule.extract(group),
            meal_duration: fields.duration.extract(group),
            volume: fields.meal_volume.extract(group),
            composition: fields.meal_composition.extract(group),
        };
    }

    let supplements = fields
        .supplements
        .find(section)
        .map(|group| Supplements {
            vitamin_d: decode_supplement(&fields.vitamin_d, group),
            vitamin_k: decode_supplement(&fields.vitamin_k, group),
            fluoride: decode_supplement(&fields.fluoride, group),
            iron: decode_supplement(&fields.iron, group),
        })
        .unwrap_or_default();

    InfantDiet {
        first_food,
        breastfeeding,
        formula,
        current_diet,
        supplements,
    }
}

fn decode_supplement(pattern: &Regex, group: &str) -> Supplement {
    let Some(caps) = pattern.captures(group) else {
        return Supplement::default();
    };
    let part = |index: usize| {
        caps.get(index)
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    Supplement {
        product_name: part(1),
        dose: part(2),
    }
}

struct PsychomotorFields {
    walking: Field,
    walking_notes: Field,
    first_words: Field,
    sentences: Field,
    language_notes: Field,
    motor_milestones: Field,
    intellectual_milestones: Field,
    behavior: Field,
    general_notes: Field,
}

static PSYCHOMOTOR: LazyLock<PsychomotorFields> = LazyLock::new(|| PsychomotorFields {
    walking: Field::labelled(WALKING),
    walking_notes: Field::labelled(WALKING_NOTES),
    first_words: Field::labelled(FIRST_WORDS),
    sentences: Field::labelled(SENTENCES),
    language_notes: Field::labelled(LANGUAGE_NOTES),
    motor_milestones: Field::labelled(MOTOR_MILESTONES),
    intellectual_milestones: Field::labelled(INTELLECTUAL_MILESTONES),
    behavior: Field::labelled(BEHAVIOR),
    general_notes: Field::labelled(GENERAL_NOTES),
});

pub fn decode_psychomotor(section: &str) -> PsychomotorDevelopment {
    let fields = &*PSYCHOMOTOR;
    PsychomotorDevelopment {
        walking: Walking {
            age_months: fields.walking.extract_measure(section, AGE_UNIT),
            notes: fields.walking_notes.extract(section),
        },
        language: Language {
            first_words_age_months: fields.first_words.extract_measure(section, AGE_UNIT),
            sentences_age_months: fields.sentences.extract_measure(section, AGE_UNIT),
            notes: fields.language_notes.extract(section),
        },
        motor_milestones: fields.motor_milestones.extract(section),
        intellectual_milestones: fields.intellectual_milestones.extract(section),
        behavior: fields.behavior.extract(section),
        general_notes: fields.general_notes.extract(section),
    }
}
