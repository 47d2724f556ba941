use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use crate::application::RosterConverter;
use crate::domain::error::Result;
use crate::domain::roster::ConversionReport;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::cli::Cli;

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .try_init();

    match execute(&cli).await {
        Ok(report) => {
            info!(output = %report.output_path.display(), "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Something went wrong: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: &Cli) -> Result<ConversionReport> {
    let config = ConfigService::load(cli.config.as_deref(), cli.overrides())?;
    RosterConverter::new(config)?.convert().await
}
