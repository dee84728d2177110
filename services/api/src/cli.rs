use crate::demo::{run_breakdown, run_demo, run_rankings, BreakdownArgs, RankArgs};
use crate::server;
use applicant_tracker::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Applicant Tracker",
    about = "Score screening questionnaires and rank candidates from the command line",
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
    /// Print the candidate ranking for a position
    Rank(RankArgs),
    /// Print the per-question score breakdown for an application
    Breakdown(BreakdownArgs),
    /// Score and rank the built-in demo data set
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON data set to serve instead of APP_DATASET_PATH or the demo data
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rankings(args),
        Command::Breakdown(args) => run_breakdown(args),
        Command::Demo => run_demo(),
    }
}
