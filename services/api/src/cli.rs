use crate::demo::{run_demo, run_generate, DemoArgs, GenerateArgs};
use crate::server;
use camreport::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Cambridge Report Card Service",
    about = "Generate and serve Cambridge-style student report cards",
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
    /// Work with report cards from the command line
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Run an end-to-end demo: sample marks through intake, grading, and rendering
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Generate a report card from a roster CSV export
    Generate(GenerateArgs),
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
        Command::Report {
            command: ReportCommand::Generate(args),
        } => run_generate(args),
        Command::Demo(args) => run_demo(args),
    }
}
