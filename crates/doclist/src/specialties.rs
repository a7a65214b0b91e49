use crate::prelude::{println, *};
use doclist_core::filter::ConsultationMode;
use doclist_core::specialty::{consultation_facets, ConsultationFacets, SpecialtyFacet};
use serde::Serialize;

use crate::session::{new_spinner, open_session};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SpecialtiesOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything the filter panel counts
#[derive(Debug, Serialize, Clone)]
pub struct SpecialtiesOutput {
    pub specialties: Vec<SpecialtyFacet>,
    pub consultation: ConsultationFacets,
}

pub async fn run(options: SpecialtiesOptions, global: crate::Global) -> Result<()> {
    let spinner = new_spinner()?;
    let output = specialties_data(&global, Some(&spinner)).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Mode of consultation:\n");
    consultation_table(&output.consultation).printstd();

    println!("\nFound {} specialties:\n", output.specialties.len());

    if output.specialties.is_empty() {
        println!("No specialties found.");
        return Ok(());
    }

    specialties_table(&output.specialties).printstd();

    Ok(())
}

/// Public data function - used by both CLI and MCP
pub async fn specialties_data(
    global: &crate::Global,
    spinner: Option<&indicatif::ProgressBar>,
) -> Result<SpecialtiesOutput> {
    let session = open_session(global, "", spinner).await.into_ready()?;

    Ok(SpecialtiesOutput {
        specialties: session.facets().to_vec(),
        consultation: consultation_facets(session.doctors()),
    })
}

/// Label of a consultation mode in the filter panel
fn panel_label(mode: ConsultationMode) -> &'static str {
    match mode {
        ConsultationMode::VideoConsult => "Video Consultation",
        ConsultationMode::InClinic => "In-clinic Consultation",
    }
}

fn consultation_table(facets: &ConsultationFacets) -> prettytable::Table {
    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Mode", "Doctors"]);

    for facet in &facets.modes {
        table.add_row(prettytable::row![panel_label(facet.mode), facet.count]);
    }
    table.add_row(prettytable::row!["All", facets.total]);

    table
}

fn specialties_table(facets: &[SpecialtyFacet]) -> prettytable::Table {
    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Specialty", "Doctors"]);

    for facet in facets {
        table.add_row(prettytable::row![&facet.label, facet.count]);
    }

    table
}
