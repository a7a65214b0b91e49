//! Filter state and the search/filter/sort pipeline
//!
//! [`apply`] is the heart of the listing: it takes the normalized doctors and
//! the user's current [`FilterState`] and returns the doctors to display, in
//! display order. It holds no state and never fails; a filter that matches
//! nothing yields an empty list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::doctor::{parse_leading_number, NormalizedDoctor};
use crate::specialty::has_specialty;

/// How a doctor sees patients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationMode {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationMode {
    pub const ALL: [ConsultationMode; 2] = [Self::VideoConsult, Self::InClinic];

    pub const fn label(self) -> &'static str {
        match self {
            Self::VideoConsult => "Video Consult",
            Self::InClinic => "In Clinic",
        }
    }

    /// Parse the exact label used in the query string
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Cheapest first
    Fees,
    /// Most experienced first
    Experience,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [Self::Fees, Self::Experience];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fees => "fees",
            Self::Experience => "experience",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user has chosen on the listing page
///
/// Mutations consume the state and return the next one; the previous value is
/// never changed in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub consultation_mode: Option<ConsultationMode>,
    /// Selected labels in the order they were picked
    pub selected_specialties: Vec<String>,
    pub sort_key: Option<SortKey>,
}

impl FilterState {
    pub fn with_search(self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..self
        }
    }

    pub fn with_consultation(self, mode: Option<ConsultationMode>) -> Self {
        Self {
            consultation_mode: mode,
            ..self
        }
    }

    pub fn with_sort(self, key: Option<SortKey>) -> Self {
        Self {
            sort_key: key,
            ..self
        }
    }

    /// Select `label`, or deselect it when it is already selected
    pub fn toggle_specialty(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        match self.selected_specialties.iter().position(|s| *s == label) {
            Some(index) => {
                self.selected_specialties.remove(index);
            }
            None => self.selected_specialties.push(label),
        }
        self
    }

    pub fn clear_specialties(self) -> Self {
        Self {
            selected_specialties: Vec::new(),
            ..self
        }
    }

    /// The "Clear All" state
    pub fn cleared() -> Self {
        Self::default()
    }

    /// True when no search, filter or sort is active
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.consultation_mode.is_none()
            && self.selected_specialties.is_empty()
            && self.sort_key.is_none()
    }
}

fn matches_search(doctor: &NormalizedDoctor, needle: &str) -> bool {
    doctor.name.to_lowercase().contains(needle)
        || doctor.primary_specialty.to_lowercase().contains(needle)
        || doctor
            .specialties
            .iter()
            .any(|specialty| specialty.to_lowercase().contains(needle))
}

fn matches_specialties(doctor: &NormalizedDoctor, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|label| has_specialty(doctor, label))
}

fn fee_value(doctor: &NormalizedDoctor) -> f64 {
    parse_leading_number(&doctor.fee).unwrap_or(0.0)
}

fn experience_value(doctor: &NormalizedDoctor) -> f64 {
    doctor.experience_years.unwrap_or(0.0)
}

fn compare(a: &NormalizedDoctor, b: &NormalizedDoctor, key: SortKey) -> Ordering {
    match key {
        SortKey::Fees => fee_value(a).total_cmp(&fee_value(b)),
        SortKey::Experience => experience_value(b).total_cmp(&experience_value(a)),
    }
}

/// Run search, consultation filter, specialty filter and sort, in that order
///
/// Sorting is stable, so doctors with equal keys keep their feed order and
/// repeated calls with the same state never reorder the list.
pub fn apply(records: &[NormalizedDoctor], state: &FilterState) -> Vec<NormalizedDoctor> {
    let needle = state.search_term.trim().to_lowercase();

    let mut result: Vec<NormalizedDoctor> = records
        .iter()
        .filter(|doctor| needle.is_empty() || matches_search(doctor, &needle))
        .filter(|doctor| {
            state
                .consultation_mode
                .map_or(true, |mode| doctor.consultation_mode == mode)
        })
        .filter(|doctor| matches_specialties(doctor, &state.selected_specialties))
        .cloned()
        .collect();

    if let Some(key) = state.sort_key {
        result.sort_by(|a, b| compare(a, b, key));
    }

    result
}
