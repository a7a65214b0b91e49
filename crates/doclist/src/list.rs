use crate::prelude::{println, *};
use colored::Colorize;
use doclist_core::doctor::NormalizedDoctor;
use doclist_core::listing::{format_fee, format_specialties, ListingOutput};

use crate::filters::FilterFlags;
use crate::session::{new_spinner, open_session};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Every doctor, in feed order:
  doclist list

  # Video consultations with a dentist or an ENT, cheapest first:
  doclist list --consult \"Video Consult\" --specialty Dentist --specialty ENT --sort fees

  # Restore a shared listing and narrow it down:
  doclist list --query \"?consult=In+Clinic&sort=experience\" --search cardio")]
pub struct ListOptions {
    /// Query string to restore the filters from (e.g. "?consult=In+Clinic&sort=fees")
    #[arg(short, long, env = "DOCLIST_QUERY", default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub filters: FilterFlags,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let spinner = new_spinner()?;
    let listing = list_data(&options.query, &options.filters, &global, Some(&spinner)).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", format_listing_text(&listing));
    }

    Ok(())
}

/// Public data function - used by both CLI and MCP
pub async fn list_data(
    query: &str,
    filters: &FilterFlags,
    global: &crate::Global,
    spinner: Option<&indicatif::ProgressBar>,
) -> Result<ListingOutput> {
    // Validate the flags before spending a fetch on them.
    let restored = filters.apply_to(doclist_core::query::parse_query(query))?;

    let mut session = open_session(global, query, spinner).await.into_ready()?;
    session.update(|_| restored);

    Ok(session.listing())
}

fn format_card(index: usize, doctor: &NormalizedDoctor) -> String {
    let mut card = String::new();

    let fee = format_fee(&doctor.fee).unwrap_or_else(|| "Fee not listed".to_string());
    card.push_str(&format!(
        "\n{} {}  {}\n",
        format!("[{index}]").yellow().bold(),
        doctor.name.white().bold(),
        fee.bright_green().bold()
    ));

    card.push_str(&format!(
        "    {}\n",
        format_specialties(&doctor.specialties).bright_white()
    ));

    if let Some(experience) = &doctor.experience {
        card.push_str(&format!("    {}\n", experience.bright_black()));
    }

    if !doctor.clinic.name.is_empty() || !doctor.clinic.location.is_empty() {
        card.push_str(&format!(
            "    {}: {} | {}: {}\n",
            "Clinic".green(),
            doctor.clinic.name.bright_white(),
            "Location".green(),
            doctor.clinic.location.bright_white()
        ));
    }

    card.push_str(&format!(
        "    {}: {} | {}: {}\n",
        "Consultation".green(),
        doctor.consultation_mode.label().cyan(),
        "ID".green(),
        doctor.id.bright_white()
    ));

    card
}

/// Convert a listing to formatted text with colors
fn format_listing_text(listing: &ListingOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "DOCTORS ({} of {})",
            listing.doctors.len(),
            listing.total_doctors
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    match &listing.empty {
        Some(empty) => {
            result.push_str(&format!("\n{}\n", empty.message.yellow()));
            result.push_str(&format!(
                "  {}: {}\n",
                "Clear all filters".green(),
                format!("doclist list --query \"?{}\"", empty.clear_filters_query).cyan()
            ));
        }
        None => {
            for (idx, doctor) in listing.doctors.iter().enumerate() {
                result.push_str(&format_card(idx + 1, doctor));
            }
        }
    }

    result.push_str(&format!("\n{}: ", "Query".bright_white().bold()));
    if listing.query.is_empty() {
        result.push_str(&format!("{}\n", "(no filters)".bright_black()));
    } else {
        result.push_str(&format!("{}\n", format!("?{}", listing.query).cyan()));
    }

    result.push('\n');
    result
}
