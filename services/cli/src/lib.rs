mod cli;
mod commands;

use roster_engine::error::AppError;
use std::process::ExitCode;

pub fn run() -> Result<ExitCode, AppError> {
    cli::run()
}
