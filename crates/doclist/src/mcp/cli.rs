#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "Expose the doctor listing as Model Context Protocol tools")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Serve doctors_list, doctors_specialties and doctors_suggest over stdio
    #[clap(name = "stdio")]
    Stdio,

    /// Serve the same tools over HTTP with an SSE endpoint
    #[clap(name = "sse")]
    Sse(SseOptions),
}

#[derive(Debug, clap::Args)]
pub struct SseOptions {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}
