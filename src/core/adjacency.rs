//! Specialty adjacency table and fit scoring.
//!
//! Each specialty maps to the specialties most likely to refer customers to
//! or from it, strongest partner first. Keys are matched exactly (case
//! sensitive) and the table is not symmetric.

use crate::core::jitter::ThreadRngJitter;
use crate::domain::ports::JitterSource;

pub const MAX_FIT_SCORE: i32 = 100;
pub const MIN_FIT_SCORE: i32 = 50;
const BASE_FIT_SCORE: i32 = 95;
const DECAY_PER_RANK: i32 = 10;
const MAX_JITTER: i32 = 5;

const ADJACENCY: &[(&str, &[&str])] = &[
    (
        "Primary Care",
        &[
            "Cardiology",
            "Endocrinology",
            "Orthopedic Surgery",
            "Dermatology",
            "Physical Therapy",
            "Behavioral Health",
        ],
    ),
    (
        "Orthopedic Surgery",
        &[
            "Physical Therapy",
            "Primary Care",
            "Sports Medicine",
            "Pain Management",
            "Chiropractic",
            "Radiology",
        ],
    ),
    (
        "Physical Therapy",
        &[
            "Orthopedic Surgery",
            "Primary Care",
            "Chiropractic",
            "Sports Medicine",
            "Pain Management",
            "Neurology",
        ],
    ),
    (
        "Chiropractic",
        &[
            "Physical Therapy",
            "Massage Therapy",
            "Primary Care",
            "Orthopedic Surgery",
            "Pain Management",
            "Acupuncture",
        ],
    ),
    (
        "Sports Medicine",
        &[
            "Orthopedic Surgery",
            "Physical Therapy",
            "Chiropractic",
            "Primary Care",
            "Nutrition",
        ],
    ),
    (
        "Pain Management",
        &[
            "Orthopedic Surgery",
            "Physical Therapy",
            "Neurology",
            "Chiropractic",
            "Behavioral Health",
        ],
    ),
    (
        "Neurology",
        &[
            "Primary Care",
            "Physical Therapy",
            "Pain Management",
            "Behavioral Health",
            "Radiology",
        ],
    ),
    (
        "Cardiology",
        &[
            "Primary Care",
            "Endocrinology",
            "Nephrology",
            "Pulmonology",
            "Vascular Surgery",
        ],
    ),
    (
        "Endocrinology",
        &[
            "Primary Care",
            "Cardiology",
            "Nutrition",
            "Ophthalmology",
            "Podiatry",
        ],
    ),
    (
        "Dermatology",
        &[
            "Primary Care",
            "Plastic Surgery",
            "Med Spa",
            "Allergy and Immunology",
            "Oncology",
        ],
    ),
    (
        "Dentist",
        &[
            "Oral Surgery",
            "Orthodontist",
            "Periodontist",
            "Endodontist",
            "Primary Care",
        ],
    ),
    (
        "Orthodontist",
        &["Dentist", "Oral Surgery", "Pediatrics", "Periodontist"],
    ),
    (
        "Oral Surgery",
        &[
            "Dentist",
            "Orthodontist",
            "Periodontist",
            "Endodontist",
            "ENT",
        ],
    ),
    (
        "Pediatrics",
        &[
            "Orthodontist",
            "Dentist",
            "Allergy and Immunology",
            "Behavioral Health",
            "ENT",
        ],
    ),
    (
        "Behavioral Health",
        &[
            "Primary Care",
            "Psychiatry",
            "Pediatrics",
            "Neurology",
            "Addiction Medicine",
        ],
    ),
    (
        "Psychiatry",
        &[
            "Behavioral Health",
            "Primary Care",
            "Neurology",
            "Addiction Medicine",
        ],
    ),
    (
        "Ophthalmology",
        &["Optometry", "Primary Care", "Endocrinology", "Neurology"],
    ),
    (
        "Optometry",
        &["Ophthalmology", "Primary Care", "Pediatrics", "Neurology"],
    ),
    (
        "Podiatry",
        &[
            "Primary Care",
            "Endocrinology",
            "Orthopedic Surgery",
            "Vascular Surgery",
            "Physical Therapy",
        ],
    ),
    (
        "OB/GYN",
        &[
            "Primary Care",
            "Pediatrics",
            "Fertility",
            "Endocrinology",
            "Behavioral Health",
        ],
    ),
    (
        "Med Spa",
        &["Dermatology", "Plastic Surgery", "Massage Therapy", "Nutrition"],
    ),
    (
        "Plastic Surgery",
        &["Dermatology", "Med Spa", "Primary Care", "Behavioral Health"],
    ),
    (
        "Massage Therapy",
        &[
            "Chiropractic",
            "Physical Therapy",
            "Acupuncture",
            "Sports Medicine",
        ],
    ),
    (
        "Acupuncture",
        &[
            "Chiropractic",
            "Massage Therapy",
            "Pain Management",
            "Primary Care",
        ],
    ),
    (
        "Nutrition",
        &[
            "Primary Care",
            "Endocrinology",
            "Sports Medicine",
            "Behavioral Health",
        ],
    ),
];

/// Phrases that search better than the specialty label itself.
const SEARCH_PHRASES: &[(&str, &str)] = &[
    ("Chiropractic", "chiropractor"),
    ("Orthopedic Surgery", "orthopedic surgeon"),
    ("Primary Care", "primary care doctor"),
    ("Physical Therapy", "physical therapist"),
    ("Sports Medicine", "sports medicine doctor"),
    ("Pain Management", "pain management clinic"),
    ("Neurology", "neurologist"),
    ("Cardiology", "cardiologist"),
    ("Endocrinology", "endocrinologist"),
    ("Dermatology", "dermatologist"),
    ("Oral Surgery", "oral surgeon"),
    ("Pediatrics", "pediatrician"),
    ("Behavioral Health", "mental health counselor"),
    ("Psychiatry", "psychiatrist"),
    ("Ophthalmology", "ophthalmologist"),
    ("Optometry", "optometrist"),
    ("Podiatry", "podiatrist"),
    ("OB/GYN", "obstetrician gynecologist"),
    ("Massage Therapy", "massage therapist"),
    ("Acupuncture", "acupuncturist"),
    ("Nutrition", "registered dietitian"),
    ("Radiology", "imaging center"),
    ("ENT", "ear nose throat doctor"),
    ("Allergy and Immunology", "allergist"),
    ("Addiction Medicine", "addiction treatment center"),
    ("Fertility", "fertility clinic"),
    ("Nephrology", "nephrologist"),
    ("Pulmonology", "pulmonologist"),
    ("Vascular Surgery", "vascular surgeon"),
    ("Oncology", "oncologist"),
];

/// Ordered referral partners for `specialty`; empty for unknown keys.
pub fn get_adjacent_specialties(specialty: &str) -> &'static [&'static str] {
    ADJACENCY
        .iter()
        .find(|(key, _)| *key == specialty)
        .map(|(_, partners)| *partners)
        .unwrap_or(&[])
}

/// Table keys in authored order.
pub fn known_specialties() -> impl Iterator<Item = &'static str> {
    ADJACENCY.iter().map(|(key, _)| *key)
}

pub fn search_phrase(specialty: &str) -> String {
    SEARCH_PHRASES
        .iter()
        .find(|(key, _)| *key == specialty)
        .map(|(_, phrase)| phrase.to_string())
        .unwrap_or_else(|| specialty.to_lowercase())
}

/// Score with unseeded jitter. See [`calculate_fit_score_with`].
pub fn calculate_fit_score(specialty: &str, adjacent_specialty: &str) -> u32 {
    calculate_fit_score_with(specialty, adjacent_specialty, &ThreadRngJitter)
}

/// `0` when `adjacent_specialty` is not a partner of `specialty`; otherwise
/// `95 - 10 * rank + jitter`, clamped to `[50, 100]`.
pub fn calculate_fit_score_with(
    specialty: &str,
    adjacent_specialty: &str,
    jitter: &dyn JitterSource,
) -> u32 {
    let Some(index) = get_adjacent_specialties(specialty)
        .iter()
        .position(|s| *s == adjacent_specialty)
    else {
        return 0;
    };

    let rank = i32::try_from(index).unwrap_or(i32::MAX / DECAY_PER_RANK);
    let offset = jitter.jitter(MAX_JITTER).clamp(-MAX_JITTER, MAX_JITTER);
    let score = BASE_FIT_SCORE
        .saturating_sub(DECAY_PER_RANK.saturating_mul(rank))
        .saturating_add(offset);

    score.clamp(MIN_FIT_SCORE, MAX_FIT_SCORE) as u32
}
