use crate::demo::{run_demo, run_score, run_templates, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use evalspace::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Evaluation Workspace",
    about = "Score subjects against weighted rubrics and report on the results",
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
    /// List the rubric templates in the configured catalog
    Templates,
    /// Score a single evaluation and print the resulting record as JSON
    Score(ScoreArgs),
    /// Seed a session with sample evaluations and print the report
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
        Command::Templates => run_templates(),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
