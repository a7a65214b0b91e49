//! Type-ahead suggestions for the search box

use crate::doctor::NormalizedDoctor;

/// Largest number of suggestions shown under the search box
pub const MAX_SUGGESTIONS: usize = 3;

/// First doctors, in feed order, whose name contains `term`
///
/// Matching is a case-insensitive substring test against the name only. A
/// blank term yields no suggestions.
pub fn suggest(records: &[NormalizedDoctor], term: &str) -> Vec<NormalizedDoctor> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|doctor| doctor.name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}
