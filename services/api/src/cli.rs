use crate::commands::{
    run_catalog, run_finance, run_match, run_quiz, run_recommend, CatalogCommand, FinanceCommand,
    MatchArgs, QuizArgs, RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use toyota_nexus::config::AppConfig;
use toyota_nexus::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Toyota Nexus",
    about = "Match drivers to Toyota vehicles, estimate payments, and serve the Nexus API",
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
    /// Estimate loan or lease payments
    Finance {
        #[command(subcommand)]
        command: FinanceCommand,
    },
    /// Score one vehicle against a stored profile
    Match(MatchArgs),
    /// Rank the catalog for a stored profile
    Recommend(RecommendArgs),
    /// Answer the lifestyle quiz interactively and save the profile
    Quiz(QuizArgs),
    /// Browse the vehicle catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
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
        Command::Finance { command } => run_finance(command),
        Command::Match(args) => run_match(&AppConfig::load()?.nexus, args),
        Command::Recommend(args) => run_recommend(&AppConfig::load()?.nexus, args),
        Command::Quiz(args) => run_quiz(&AppConfig::load()?.nexus, args),
        Command::Catalog { command } => run_catalog(&AppConfig::load()?.nexus, command),
    }
}
