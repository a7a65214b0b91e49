use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{text_result, JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS};
use crate::filters::FilterFlags;

fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    // Tools without required arguments may be called with no arguments at all.
    let arguments = match arguments {
        None | Some(serde_json::Value::Null) => serde_json::json!({}),
        Some(value) => value,
    };

    serde_json::from_value(arguments)
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid arguments: {e}")))
}

fn execution_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError::new(INTERNAL_ERROR, format!("Tool execution error: {e}"))
}

pub async fn handle_doctors_list(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DoctorsListArgs {
        #[serde(default)]
        query: String,
        #[serde(flatten)]
        filters: FilterFlags,
    }

    let args: DoctorsListArgs = parse_arguments(arguments)?;

    // Bad filter values are the caller's fault, not a failed execution.
    args.filters
        .apply_to(doclist_core::query::parse_query(&args.query))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid arguments: {e}")))?;

    if global.verbose {
        eprintln!(
            "Calling doctors_list: query={:?}, filters={:?}",
            args.query, args.filters
        );
    }

    let listing = crate::list::list_data(&args.query, &args.filters, global, None)
        .await
        .map_err(execution_error)?;

    text_result(&listing)
}

pub async fn handle_doctors_specialties(
    _arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling doctors_specialties");
    }

    let output = crate::specialties::specialties_data(global, None)
        .await
        .map_err(execution_error)?;

    text_result(&output)
}

pub async fn handle_doctors_suggest(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DoctorsSuggestArgs {
        term: String,
    }

    let args: DoctorsSuggestArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling doctors_suggest: term={:?}", args.term);
    }

    let output = crate::suggest::suggest_data(&args.term, global, None)
        .await
        .map_err(execution_error)?;

    text_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_arguments_defaults_missing_object() {
        #[derive(Deserialize)]
        struct Args {
            #[serde(default)]
            query: String,
            #[serde(flatten)]
            filters: FilterFlags,
        }

        let args: Args = parse_arguments(None).unwrap();

        assert_eq!(args.query, "");
        assert!(!args.filters.clear);
        assert!(args.filters.specialties.is_empty());
    }

    #[test]
    fn test_parse_arguments_flattens_filter_flags() {
        #[derive(Deserialize)]
        struct Args {
            #[serde(flatten)]
            filters: FilterFlags,
        }

        let args: Args = parse_arguments(Some(json!({
            "search": "cardio",
            "specialties": ["Dentist", "ENT"],
            "sort": "fees"
        })))
        .unwrap();

        assert_eq!(args.filters.search.as_deref(), Some("cardio"));
        assert_eq!(args.filters.specialties, vec!["Dentist", "ENT"]);
        assert_eq!(args.filters.sort.as_deref(), Some("fees"));
        assert!(args.filters.consult.is_none());
    }

    #[tokio::test]
    async fn test_suggest_requires_term() {
        let global = crate::Global {
            source_url: None,
            verbose: false,
        };

        let error = handle_doctors_suggest(Some(json!({})), &global)
            .await
            .unwrap_err();

        assert_eq!(error.code, INVALID_PARAMS);
    }

    #[test]
    fn test_text_result_wraps_pretty_json() {
        let value = text_result(&json!({"term": "an"})).unwrap();

        assert_eq!(value["content"][0]["type"], "text");
        assert!(value["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("\"term\": \"an\""));
        assert!(value.get("isError").is_none());
    }
}
