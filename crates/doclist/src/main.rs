#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod feed;
mod filters;
mod list;
mod mcp;
mod prelude;
mod query;
mod session;
mod specialties;
mod suggest;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search, filter and sort a doctor directory"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// URL of the doctor feed (a JSON array of doctors)
    #[clap(long, env = "DOCLIST_SOURCE_URL", global = true)]
    source_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "DOCLIST_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List doctors, optionally searched, filtered and sorted
    List(crate::list::ListOptions),

    /// List the specialties present in the feed with doctor counts
    Specialties(crate::specialties::SpecialtiesOptions),

    /// Suggest up to three doctors whose name matches a term
    Suggest(crate::suggest::SuggestOptions),

    /// Parse and rewrite a listing query string (offline)
    Query(crate::query::QueryOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Specialties(options) => crate::specialties::run(options, app.global).await,
        SubCommands::Suggest(options) => crate::suggest::run(options, app.global).await,
        SubCommands::Query(options) => crate::query::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
