use clap::{Args, Parser, Subcommand};
use gramstay::error::AppError;

use crate::demo::{run_demo, run_search, DemoArgs, SearchArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Gramstay Listing Service",
    about = "Run and demonstrate the rural room marketplace from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Search the seeded listing catalog and print matching cards
    Search(SearchArgs),
    /// Run an end-to-end CLI demo covering the owner submission workflow
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
