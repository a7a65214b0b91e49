//! Listing view model
//!
//! Bundles everything a presentation layer needs to draw the listing page from
//! one snapshot of the session: the doctors to show, the specialty facets, the
//! type-ahead suggestions and the query string that reflects the state.

use serde::Serialize;

use crate::doctor::NormalizedDoctor;
use crate::filter::{apply, FilterState};
use crate::query::serialize_query;
use crate::specialty::{consultation_facets, ConsultationFacets, SpecialtyFacet};
use crate::suggest::suggest;

/// Shown in place of an empty specialty list
pub const NO_SPECIALTIES: &str = "N/A";

/// What to show when the filters leave no doctors
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EmptyResult {
    pub message: String,
    /// Query string of the "Clear all filters" action
    pub clear_filters_query: String,
}

/// Complete listing output
#[derive(Debug, Serialize, Clone)]
pub struct ListingOutput {
    pub doctors: Vec<NormalizedDoctor>,
    /// Doctors in the fetched batch, before filtering
    pub total_doctors: usize,
    pub facets: Vec<SpecialtyFacet>,
    /// Doctors per consultation mode, over the unfiltered batch
    pub consultation: ConsultationFacets,
    pub suggestions: Vec<NormalizedDoctor>,
    pub state: FilterState,
    /// Query string reflecting `state`, without the leading `?`
    pub query: String,
    pub empty: Option<EmptyResult>,
}

/// Format a cleaned fee for display, e.g. `"500"` becomes `"₹500"`
pub fn format_fee(fee: &str) -> Option<String> {
    (!fee.is_empty()).then(|| format!("₹{fee}"))
}

/// Join specialties for a card, falling back to `"N/A"`
pub fn format_specialties(specialties: &[String]) -> String {
    let labels: Vec<&str> = specialties
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if labels.is_empty() {
        NO_SPECIALTIES.to_string()
    } else {
        labels.join(", ")
    }
}

/// Build the listing for `state` over the fetched `records`
///
/// `facets` are passed in rather than rebuilt: they only change when the
/// fetched batch does. `existing_query` is the query string currently shown,
/// so unrelated parameters survive.
pub fn build_listing(
    records: &[NormalizedDoctor],
    facets: &[SpecialtyFacet],
    state: &FilterState,
    existing_query: &str,
) -> ListingOutput {
    let doctors = apply(records, state);
    let query = serialize_query(state, existing_query);

    let empty = doctors.is_empty().then(|| EmptyResult {
        message: "No doctors match your current filters.".to_string(),
        clear_filters_query: serialize_query(&FilterState::cleared(), existing_query),
    });

    ListingOutput {
        doctors,
        total_doctors: records.len(),
        facets: facets.to_vec(),
        consultation: consultation_facets(records),
        suggestions: suggest(records, &state.search_term),
        state: state.clone(),
        query,
        empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor::normalize_batch;
    use crate::filter::{ConsultationMode, SortKey};
    use crate::specialty::{build_index, COMMON_SPECIALTIES};
    use serde_json::json;

    fn records() -> Vec<NormalizedDoctor> {
        normalize_batch(vec![
            json!({"id": "1", "name": "Dr. A", "specialities": [{"name": "Dentist"}], "fees": "₹ 800", "video_consult": true}),
            json!({"id": "2", "name": "Dr. B", "specialities": [{"name": "ENT"}], "fees": "₹ 400", "in_clinic": true}),
        ])
        .doctors
    }

    #[test]
    fn test_format_fee() {
        assert_eq!(format_fee("500"), Some("₹500".to_string()));
        assert_eq!(format_fee(""), None);
    }

    #[test]
    fn test_format_specialties() {
        assert_eq!(
            format_specialties(&["Dentist".to_string(), "Ent".to_string()]),
            "Dentist, Ent"
        );
        assert_eq!(format_specialties(&[]), "N/A");
        assert_eq!(format_specialties(&[" ".to_string()]), "N/A");
    }

    #[test]
    fn test_build_listing() {
        let records = records();
        let facets = build_index(&records, COMMON_SPECIALTIES);
        let state = FilterState::default()
            .with_search("dr")
            .with_sort(Some(SortKey::Fees));

        let listing = build_listing(&records, &facets, &state, "ref=home");

        let ids: Vec<&str> = listing.doctors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(listing.total_doctors, 2);
        assert_eq!(listing.facets, facets);
        assert_eq!(listing.consultation.total, 2);
        assert_eq!(listing.consultation.count(ConsultationMode::VideoConsult), 1);
        assert_eq!(listing.consultation.count(ConsultationMode::InClinic), 1);
        assert_eq!(listing.suggestions.len(), 2);
        assert_eq!(listing.query, "ref=home&search=dr&sort=fees");
        assert!(listing.empty.is_none());
    }

    #[test]
    fn test_build_listing_empty_result() {
        let records = records();
        let state = FilterState::default()
            .with_consultation(Some(ConsultationMode::VideoConsult))
            .toggle_specialty("Ent");

        let listing = build_listing(&records, &[], &state, "ref=home");

        assert!(listing.doctors.is_empty());
        // counts describe the whole batch, not the filtered list
        assert_eq!(listing.consultation.total, 2);
        let empty = listing.empty.unwrap();
        assert_eq!(empty.message, "No doctors match your current filters.");
        assert_eq!(empty.clear_filters_query, "ref=home");
    }

    #[test]
    fn test_build_listing_json_shape() {
        let records = records();
        let listing = build_listing(&records, &[], &FilterState::default(), "");
        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(value["doctors"][0]["consultation_mode"], "Video Consult");
        assert_eq!(value["doctors"][1]["consultation_mode"], "In Clinic");
        assert_eq!(value["state"]["sort_key"], serde_json::Value::Null);
        assert_eq!(value["query"], "");
        assert_eq!(value["consultation"]["total"], 2);
        assert_eq!(value["consultation"]["modes"][0]["mode"], "Video Consult");
        assert_eq!(value["consultation"]["modes"][0]["count"], 1);
        assert!(value["suggestions"].as_array().unwrap().is_empty());
    }
}
