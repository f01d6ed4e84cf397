use crate::commands::{run_generate, run_report, GenerateArgs, ReportArgs};
use clap::{Parser, Subcommand};
use roster_engine::config::AppConfig;
use roster_engine::error::AppError;
use roster_engine::telemetry;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    about = "Generate penalty-balanced doctor rosters for the Frankston and Rosebud sites",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a roster and print the result JSON
    Generate(GenerateArgs),
    /// Generate a roster and print human-readable views
    Report(ReportArgs),
}

pub(crate) fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Generate(args) => run_generate(args, &config),
        Command::Report(args) => run_report(args, &config),
    }
}
