//! ## stock-exchange
//! Greedy scheduler and trace checker for production economies.
//!
//! ```text
//! stock-exchange run <config_file> <waiting_time_seconds> [--report PATH] [--metrics]
//! stock-exchange check <config_file> <log_file> [--report PATH]
//! ```

use std::process::ExitCode;

use clap::Parser;
use exchange_config::ExchangeSettings;
use exchange_telemetry::{EventLogger, MetricsRecorder};

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match ExchangeSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    EventLogger::init(&settings.telemetry.log_level, settings.telemetry.json);

    let metrics = match MetricsRecorder::new() {
        Ok(metrics) => metrics,
        Err(e) => {
            eprintln!("Failed to set up metrics: {e}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run_command(cli, &settings, &metrics).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Exiting...");
            ExitCode::FAILURE
        }
    }
}
