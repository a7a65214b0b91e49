//! Query string <-> filter state
//!
//! The listing mirrors its [`FilterState`] into four query parameters so a
//! filtered view can be shared or restored:
//!
//! | parameter     | value                                  |
//! |---------------|----------------------------------------|
//! | `search`      | free-text term                         |
//! | `consult`     | `Video Consult` or `In Clinic`         |
//! | `specialties` | comma-separated specialty labels       |
//! | `sort`        | `fees` or `experience`                 |
//!
//! [`parse_query`] reads them on load, [`serialize_query`] writes them back
//! after every change. Parameters that belong to someone else are carried
//! through untouched and keep their position.

use crate::filter::{ConsultationMode, FilterState, SortKey};

pub const SEARCH_PARAM: &str = "search";
pub const CONSULT_PARAM: &str = "consult";
pub const SPECIALTIES_PARAM: &str = "specialties";
pub const SORT_PARAM: &str = "sort";

fn pairs(query: &str) -> impl Iterator<Item = &str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
}

/// Decode one form-urlencoded component (`+` is a space)
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map(|value| value.into_owned());
    decoded.unwrap_or(spaced)
}

/// Encode one form-urlencoded component (a space becomes `+`)
fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

fn split_pair(pair: &str) -> (String, String) {
    match pair.split_once('=') {
        Some((key, value)) => (decode_component(key), decode_component(value)),
        None => (decode_component(pair), String::new()),
    }
}

/// Look up the first value of `name` in a query string
pub fn query_param(query: &str, name: &str) -> Option<String> {
    pairs(query)
        .map(split_pair)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Read the filter state out of a query string
///
/// A leading `?` is optional. Missing parameters leave the matching field
/// empty, and so do `consult` or `sort` values the listing does not know.
pub fn parse_query(query: &str) -> FilterState {
    let search_term = query_param(query, SEARCH_PARAM).unwrap_or_default();

    let consultation_mode =
        query_param(query, CONSULT_PARAM).and_then(|value| ConsultationMode::from_label(&value));

    let selected_specialties = query_param(query, SPECIALTIES_PARAM)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let sort_key = query_param(query, SORT_PARAM).and_then(|value| SortKey::from_param(&value));

    FilterState {
        search_term,
        consultation_mode,
        selected_specialties,
        sort_key,
    }
}

fn managed_values(state: &FilterState) -> [(&'static str, Option<String>); 4] {
    let specialties =
        (!state.selected_specialties.is_empty()).then(|| state.selected_specialties.join(","));

    [
        (
            SEARCH_PARAM,
            (!state.search_term.is_empty()).then(|| state.search_term.clone()),
        ),
        (
            CONSULT_PARAM,
            state.consultation_mode.map(|mode| mode.label().to_string()),
        ),
        (SPECIALTIES_PARAM, specialties),
        (SORT_PARAM, state.sort_key.map(|key| key.as_str().to_string())),
    ]
}

/// Write the filter state into `existing_query`, returning the new query
///
/// Each of the four listing parameters replaces its first occurrence in place
/// (later duplicates are dropped) or is appended when absent; empty or unset
/// values remove the parameter. The result has no leading `?`.
pub fn serialize_query(state: &FilterState, existing_query: &str) -> String {
    // (decoded key, pair exactly as it will be written)
    let mut entries: Vec<(String, String)> = pairs(existing_query)
        .map(|pair| (split_pair(pair).0, pair.to_string()))
        .collect();

    for (name, value) in managed_values(state) {
        let Some(value) = value else {
            entries.retain(|(key, _)| key != name);
            continue;
        };

        let pair = format!("{name}={}", encode_component(&value));
        match entries.iter().position(|(key, _)| key == name) {
            Some(first) => {
                entries[first].1 = pair;
                let mut index = 0;
                entries.retain(|(key, _)| {
                    let keep = key != name || index == first;
                    index += 1;
                    keep
                });
            }
            None => entries.push((name.to_string(), pair)),
        }
    }

    entries
        .into_iter()
        .map(|(_, pair)| pair)
        .collect::<Vec<_>>()
        .join("&")
}
