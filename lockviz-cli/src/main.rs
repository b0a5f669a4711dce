mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use lockviz_core::config::LockvizConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::ImageWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = LockvizConfig::from_env()?;
    logging::init_tracing(&config.general).map_err(|e| CliError::Config(e.to_string()))?;

    tracing::debug!(
        rows_per_source = config.layout.rows_per_source,
        spacing = config.layout.spacing,
        width = config.chart.width,
        height = config.chart.height,
        "configuration loaded"
    );

    match cli.command {
        Commands::Locket(args) => {
            let mut writer = ImageWriter::stdout();
            commands::locket::execute(args, &config, &mut writer).await
        }
    }
}
