//! Specialty facets for the filter panel

use serde::Serialize;
use std::collections::BTreeSet;

use crate::doctor::NormalizedDoctor;
use crate::filter::ConsultationMode;

/// Reference list of specialties offered by the listing
///
/// Entries only surface as facets when at least one doctor carries them.
pub const COMMON_SPECIALTIES: &[&str] = &[
    "General Physician",
    "Dentist",
    "Dermatologist",
    "Paediatrician",
    "Gynaecologist",
    "ENT",
    "Diabetologist",
    "Cardiologist",
    "Physiotherapist",
    "Endocrinologist",
    "Orthopaedic",
    "Ophthalmologist",
    "Gastroenterologist",
    "Pulmonologist",
    "Psychiatrist",
    "Urologist",
    "Dietitian-Nutritionist",
    "Psychologist",
    "Sexologist",
    "Nephrologist",
    "Neurologist",
    "Oncologist",
    "Ayurveda",
    "Homeopath",
];

/// A specialty label with the number of doctors that carry it
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SpecialtyFacet {
    pub label: String,
    pub count: usize,
}

/// Canonical casing for a specialty label
///
/// Only the first character of the whole label is upper-cased; the rest is
/// lower-cased, so `"dietitian-Nutritionist"` becomes `"Dietitian-nutritionist"`.
pub fn canonical_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Whether `doctor` lists `label`, ignoring case
pub fn has_specialty(doctor: &NormalizedDoctor, label: &str) -> bool {
    let label = label.to_lowercase();
    doctor
        .specialties
        .iter()
        .any(|specialty| specialty.to_lowercase() == label)
}

fn count_doctors(records: &[NormalizedDoctor], label: &str) -> usize {
    records
        .iter()
        .filter(|doctor| has_specialty(doctor, label))
        .count()
}

/// Build the sorted specialty facets for a set of doctors
///
/// Every specialty present in `records` becomes a facet, plus the `baseline`
/// entries matched by at least one doctor. Labels are deduplicated by their
/// canonical casing and sorted ascending.
pub fn build_index(records: &[NormalizedDoctor], baseline: &[&str]) -> Vec<SpecialtyFacet> {
    let mut labels: BTreeSet<String> = records
        .iter()
        .flat_map(|doctor| doctor.specialties.iter())
        .map(|specialty| specialty.trim())
        .filter(|specialty| !specialty.is_empty())
        .map(canonical_label)
        .collect();

    for entry in baseline {
        let label = canonical_label(entry.trim());
        if !label.is_empty() && count_doctors(records, &label) > 0 {
            labels.insert(label);
        }
    }

    labels
        .into_iter()
        .map(|label| SpecialtyFacet {
            count: count_doctors(records, &label),
            label,
        })
        .collect()
}

/// Number of doctors offering one consultation mode
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ConsultationFacet {
    pub mode: ConsultationMode,
    pub count: usize,
}

/// Counts behind the consultation-mode radio buttons
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct ConsultationFacets {
    /// One entry per mode, in [`ConsultationMode::ALL`] order
    pub modes: Vec<ConsultationFacet>,
    /// The "All" option: every doctor, whatever the mode
    pub total: usize,
}

impl ConsultationFacets {
    pub fn count(&self, mode: ConsultationMode) -> usize {
        self.modes
            .iter()
            .find(|facet| facet.mode == mode)
            .map_or(0, |facet| facet.count)
    }
}

/// Count the doctors per consultation mode over the full, unfiltered list
pub fn consultation_facets(records: &[NormalizedDoctor]) -> ConsultationFacets {
    let modes = ConsultationMode::ALL
        .into_iter()
        .map(|mode| ConsultationFacet {
            mode,
            count: records
                .iter()
                .filter(|doctor| doctor.consultation_mode == mode)
                .count(),
        })
        .collect();

    ConsultationFacets {
        modes,
        total: records.len(),
    }
}
