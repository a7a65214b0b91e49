use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use doclist_core::filter::FilterState;
use doclist_core::query::{parse_query, serialize_query};
use serde::Serialize;

use crate::filters::FilterFlags;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Show the filters a shared link restores:
  doclist query \"?consult=In+Clinic&sort=experience\"

  # Pick a specialty and see the query string the listing would show:
  doclist query \"?utm_source=mail&sort=fees\" --specialty Dentist

NOTES:
  - Works offline: the doctor feed is not fetched
  - Parameters other than search, consult, specialties and sort are kept as they are")]
pub struct QueryOptions {
    /// Current query string (a leading "?" is optional)
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub filters: FilterFlags,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct QueryOutput {
    pub state: FilterState,
    /// Query string after the changes, without the leading `?`
    pub query: String,
}

pub async fn run(options: QueryOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Parsing query string: {:?}", options.query);
    }

    let output = query_data(&options.query, &options.filters)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_query_text(&output));
    }

    Ok(())
}

/// Restore the state from `query`, apply the flags and re-serialize
pub fn query_data(query: &str, filters: &FilterFlags) -> Result<QueryOutput> {
    let state = filters.apply_to(parse_query(query))?;
    let query = serialize_query(&state, query);

    Ok(QueryOutput { state, query })
}

fn format_query_text(output: &QueryOutput) -> String {
    let state = &output.state;
    let or_none = |value: Option<&str>| value.unwrap_or("-").to_string();

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![
        "Search",
        or_none(Some(state.search_term.as_str()).filter(|s| !s.is_empty()))
    ]);
    table.add_row(prettytable::row![
        "Consultation",
        or_none(state.consultation_mode.map(|mode| mode.label()))
    ]);
    table.add_row(prettytable::row![
        "Specialties",
        if state.selected_specialties.is_empty() {
            "-".to_string()
        } else {
            state.selected_specialties.join(", ")
        }
    ]);
    table.add_row(prettytable::row![
        "Sort",
        or_none(state.sort_key.map(|key| key.as_str()))
    ]);

    format!(
        "{}\n{}: {}\n",
        table,
        "Query".bright_white().bold(),
        format!("?{}", output.query).cyan()
    )
}
