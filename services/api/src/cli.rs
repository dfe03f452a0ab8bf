use crate::infra::{parse_answer_pair, parse_engine};
use crate::score::run_score;
use crate::server;
use clap::{Args, Parser, Subcommand};
use method_advisor::error::AppError;
use method_advisor::recommendation::EngineKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Methodology Advisor",
    about = "Rank delivery methodologies for a project from questionnaire answers",
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
    /// Score a single answer set and print the ranking as JSON
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the methodology catalog CSV used by the fuzzy engine
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Scoring engine: `sensitivity` or `fuzzy` (defaults to APP_DEFAULT_ENGINE)
    #[arg(long, value_parser = parse_engine)]
    pub(crate) engine: Option<EngineKind>,
    /// JSON file holding a flat object of factor -> answer
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Individual answers as factor=value; repeatable and applied after --answers
    #[arg(long = "answer", value_parser = parse_answer_pair)]
    pub(crate) answer: Vec<(String, String)>,
    /// Methodology catalog CSV used by the fuzzy engine
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
    }
}
