//! Family history paragraph.
//!
//! Sections, in order: father, mother, consanguinity, personal pathologies,
//! siblings. Each one is omitted when it has nothing to say.

use std::sync::LazyLock;

use regex::Regex;

use super::grammar::{
    capture_section, join_present, match_label, section, section_pattern, Field, Fragments,
    SECTION_SEPARATOR,
};
use crate::models::{present, Consanguinity, FamilyHistory, Parent};

pub const FATHER_HEADER: &str = "Père:";
pub const MOTHER_HEADER: &str = "Mère:";
pub const CONSANGUINITY_HEADER: &str = "Consanguinité:";
pub const PATHOLOGIES_HEADER: &str = "Pathologies personnelles:";
pub const SIBLINGS_HEADER: &str = "Fratrie:";

const HEADERS: [&str; 5] = [
    FATHER_HEADER,
    MOTHER_HEADER,
    CONSANGUINITY_HEADER,
    PATHOLOGIES_HEADER,
    SIBLINGS_HEADER,
];

const AGE: &str = "Âge";
const AGE_UNIT: &str = "ans";
const PROFESSION: &str = "Profession";
const ORIGIN: &str = "Origine";
const DEGREE: &str = "Degré";
const SIBLINGS_COUNT: &str = "Nombre";
const SIBLINGS_INFO: &str = "Informations";

// =========================================================================
// Encoder
// =========================================================================

/// Render a family record as its paragraph. Empty records give `""`.
pub fn format_family_paragraph(record: &FamilyHistory) -> String {
    join_present(
        [
            section(FATHER_HEADER, encode_parent(&record.father)),
            section(MOTHER_HEADER, encode_parent(&record.mother)),
            section(CONSANGUINITY_HEADER, encode_consanguinity(record)),
            section(
                PATHOLOGIES_HEADER,
                present(&record.personal_pathologies).map(str::to_string),
            ),
            section(SIBLINGS_HEADER, encode_siblings(record)),
        ],
        SECTION_SEPARATOR,
    )
    .unwrap_or_default()
}

fn encode_parent(parent: &Parent) -> Option<String> {
    let mut group = Fragments::new();
    group.measured(AGE, &parent.age, AGE_UNIT);
    group.labelled(PROFESSION, &parent.profession);
    group.labelled(ORIGIN, &parent.country_of_origin);
    group.join()
}

fn encode_consanguinity(record: &FamilyHistory) -> Option<String> {
    let consanguinity = record.consanguinity?;
    let mut group = Fragments::new();
    group.push(consanguinity.label());
    if consanguinity == Consanguinity::Yes {
        group.labelled(DEGREE, &record.consanguinity_degree);
    }
    group.join()
}

fn encode_siblings(record: &FamilyHistory) -> Option<String> {
    let mut group = Fragments::new();
    group.labelled(SIBLINGS_COUNT, &record.siblings_count);
    group.labelled(SIBLINGS_INFO, &record.siblings_info);
    group.join()
}

// =========================================================================
// Decoder
// =========================================================================

/// `"Père:"` becomes `Père\s*:`, so `"Père :"` is accepted as well.
fn header_regex(header: &str) -> String {
    let name = header.trim_end_matches(':');
    format!(r"{}\s*:", regex::escape(name))
}

struct SectionPatterns {
    father: Regex,
    mother: Regex,
    consanguinity: Regex,
    pathologies: Regex,
    siblings: Regex,
}

static SECTIONS: LazyLock<SectionPatterns> = LazyLock::new(|| {
    let terminators: Vec<String> = HEADERS.iter().map(|h| header_regex(h)).collect();
    let terminators: Vec<&str> = terminators.iter().map(String::as_str).collect();
    let pattern = |header: &str| section_pattern(&header_regex(header), &terminators);

    SectionPatterns {
        father: pattern(FATHER_HEADER),
        mother: pattern(MOTHER_HEADER),
        consanguinity: pattern(CONSANGUINITY_HEADER),
        pathologies: pattern(PATHOLOGIES_HEADER),
        siblings: pattern(SIBLINGS_HEADER),
    }
});

/// Recover a family record from its paragraph. Missing pieces stay unset.
pub fn parse_family_paragraph(paragraph: &str) -> FamilyHistory {
    let mut record = FamilyHistory {
        father: father_section(paragraph).map(decode_parent).unwrap_or_default(),
        mother: mother_section(paragraph).map(decode_parent).unwrap_or_default(),
        personal_pathologies: pathologies_section(paragraph).map(str::to_string),
        ..Default::default()
    };

    if let Some(body) = consanguinity_section(paragraph) {
        let (consanguinity, degree) = decode_consanguinity(body);
        record.consanguinity = consanguinity;
        record.consanguinity_degree = degree;
    }
    if let Some(body) = siblings_section(paragraph) {
        let (count, info) = decode_siblings(body);
        record.siblings_count = count;
        record.siblings_info = info;
    }

    record
}

pub fn father_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.father, paragraph)
}

pub fn mother_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.mother, paragraph)
}

pub fn consanguinity_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.consanguinity, paragraph)
}

/// Free text, kept verbatim.
pub fn pathologies_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.pathologies, paragraph)
}

pub fn siblings_section(paragraph: &str) -> Option<&str> {
    capture_section(&SECTIONS.siblings, paragraph)
}

struct FamilyFields {
    age: Field,
    profession: Field,
    origin: Field,
    answer: Regex,
    degree: Field,
    siblings_count: Field,
    siblings_info: Field,
}

static FIELDS: LazyLock<FamilyFields> = LazyLock::new(|| FamilyFields {
    age: Field::labelled(AGE),
    profession: Field::labelled(PROFESSION),
    origin: Field::labelled(ORIGIN),
    answer: Regex::new(r"^\s*([^.,;]+)").unwrap(),
    degree: Field::labelled(DEGREE),
    siblings_count: Field::labelled(SIBLINGS_COUNT),
    siblings_info: Field::labelled(SIBLINGS_INFO),
});

pub fn decode_parent(section: &str) -> Parent {
    let fields = &*FIELDS;
    Parent {
        age: fields.age.extract_measure(section, AGE_UNIT),
        profession: fields.profession.extract(section),
        country_of_origin: fields.origin.extract(section),
    }
}

/// The answer (`oui`/`non`) leads the section; the degree only counts for `oui`.
pub fn decode_consanguinity(section: &str) -> (Option<Consanguinity>, Option<String>) {
    let fields = &*FIELDS;
    let consanguinity = fields
        .answer
        .captures(section)
        .and_then(|caps| caps.get(1))
        .and_then(|answer| match_label(answer.as_str(), &Consanguinity::ALL, Consanguinity::label));

    let degree = match consanguinity {
        Some(Consanguinity::Yes) => fields.degree.extract(section),
        _ => None,
    };

    (consanguinity, degree)
}

pub fn decode_siblings(section: &str) -> (Option<String>, Option<String>) {
    let fields = &*FIELDS;
    (
        fields.siblings_count.extract(section),
        fields.siblings_info.extract(section),
    )
}
