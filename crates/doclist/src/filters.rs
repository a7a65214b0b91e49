use crate::prelude::*;
use doclist_core::filter::{ConsultationMode, FilterState, SortKey};

/// Filter flags shared by the commands that drive the listing
///
/// Flags are applied on top of whatever state the query string restored, in
/// the same way a user would click through the filter panel.
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone, Default)]
#[serde(default)]
pub struct FilterFlags {
    /// Reset every filter first (the "Clear All" action)
    #[arg(long)]
    pub clear: bool,

    /// Search doctors by name or specialty
    #[arg(short, long)]
    pub search: Option<String>,

    /// Consultation mode: "Video Consult" or "In Clinic" (empty to clear)
    #[arg(short, long)]
    pub consult: Option<String>,

    /// Specialty to filter by; repeat to select several (any of them matches)
    #[arg(long = "specialty", value_name = "SPECIALTY")]
    pub specialties: Vec<String>,

    /// Sort order: "fees" (lowest first) or "experience" (most first); empty to clear
    #[arg(long)]
    pub sort: Option<String>,
}

/// Parse a consultation mode label, where an empty value means "any"
pub fn parse_consultation(value: &str) -> Result<Option<ConsultationMode>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    ConsultationMode::from_label(value).map(Some).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "unknown consultation mode '{value}'. Valid modes: Video Consult, In Clinic"
        ))
        .into()
    })
}

/// Parse a sort key, where an empty value means "feed order"
pub fn parse_sort(value: &str) -> Result<Option<SortKey>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    SortKey::from_param(value).map(Some).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "unknown sort key '{value}'. Valid keys: fees, experience"
        ))
        .into()
    })
}

impl FilterFlags {
    /// Apply the flags to `state`, returning the next state
    pub fn apply_to(&self, state: FilterState) -> Result<FilterState> {
        let mut state = if self.clear {
            FilterState::cleared()
        } else {
            state
        };

        if let Some(search) = &self.search {
            state = state.with_search(search.clone());
        }

        if let Some(consult) = &self.consult {
            state = state.with_consultation(parse_consultation(consult)?);
        }

        if !self.specialties.is_empty() {
            state = self
                .specialties
                .iter()
                .map(|label| label.trim())
                .filter(|label| !label.is_empty())
                .fold(state.clear_specialties(), |state, label| {
                    if state.selected_specialties.iter().any(|s| s == label) {
                        state
                    } else {
                        state.toggle_specialty(label)
                    }
                });
        }

        if let Some(sort) = &self.sort {
            state = state.with_sort(parse_sort(sort)?);
        }

        Ok(state)
    }
}
