use crate::prelude::{println, *};
use colored::Colorize;
use doclist_core::listing::format_specialties;
use doclist_core::suggest::suggest;
use serde::Serialize;

use crate::session::{new_spinner, open_session};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SuggestOptions {
    /// Part of a doctor's name
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One entry of the type-ahead dropdown
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SuggestionItem {
    pub id: String,
    pub name: String,
    pub specialties: String,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct SuggestOutput {
    pub term: String,
    pub suggestions: Vec<SuggestionItem>,
}

pub async fn run(options: SuggestOptions, global: crate::Global) -> Result<()> {
    let spinner = new_spinner()?;
    let output = suggest_data(&options.term, &global, Some(&spinner)).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_suggestions_text(&output));
    }

    Ok(())
}

/// Public data function - used by both CLI and MCP
pub async fn suggest_data(
    term: &str,
    global: &crate::Global,
    spinner: Option<&indicatif::ProgressBar>,
) -> Result<SuggestOutput> {
    let session = open_session(global, "", spinner).await.into_ready()?;

    let suggestions = suggest(session.doctors(), term)
        .into_iter()
        .map(|doctor| SuggestionItem {
            specialties: format_specialties(&doctor.specialties),
            id: doctor.id,
            name: doctor.name,
            photo: doctor.photo,
        })
        .collect();

    Ok(SuggestOutput {
        term: term.to_string(),
        suggestions,
    })
}

fn format_suggestions_text(output: &SuggestOutput) -> String {
    // The dropdown stays hidden until something is typed.
    if output.term.trim().is_empty() {
        return String::new();
    }

    if output.suggestions.is_empty() {
        return format!(
            "{}\n",
            format!("No doctors found matching \"{}\"", output.term).yellow()
        );
    }

    output
        .suggestions
        .iter()
        .map(|item| {
            format!(
                "{}\n    {}\n",
                item.name.white().bold(),
                item.specialties.bright_black()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> SuggestionItem {
        SuggestionItem {
            id: id.to_string(),
            name: name.to_string(),
            specialties: "Dentist".to_string(),
            photo: None,
        }
    }

    #[test]
    fn test_format_suggestions_text() {
        let output = SuggestOutput {
            term: "an".to_string(),
            suggestions: vec![item("1", "Dr. Anil Kumar"), item("3", "Dr. Anita Shah")],
        };

        let formatted = format_suggestions_text(&output);

        assert!(formatted.contains("Dr. Anil Kumar"));
        assert!(formatted.contains("Dr. Anita Shah"));
        assert!(formatted.contains("Dentist"));
    }

    #[test]
    fn test_format_suggestions_text_no_match() {
        let output = SuggestOutput {
            term: "zed".to_string(),
            suggestions: vec![],
        };

        let formatted = format_suggestions_text(&output);

        assert!(formatted.contains("No doctors found matching \"zed\""));
    }

    #[test]
    fn test_format_suggestions_text_blank_term() {
        let output = SuggestOutput {
            term: "  ".to_string(),
            suggestions: vec![],
        };

        assert!(format_suggestions_text(&output).is_empty());
    }
}
