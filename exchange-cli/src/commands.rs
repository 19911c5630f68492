use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use exchange_config::ExchangeSettings;
use exchange_engine::{parse_waiting_time, run_checker_mode, run_scheduler_mode, RuntimeError};
use exchange_telemetry::MetricsRecorder;

#[derive(Parser)]
#[command(name = "stock-exchange", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Schedule processes greedily and write the trace next to the config
    Run(RunArgs),
    /// Replay a trace against a config and report the first infeasible launch
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Economy file (stocks, processes, optimize directive)
    pub config_file: PathBuf,
    /// Wall-clock budget in seconds, fractions allowed
    #[arg(value_parser = parse_waiting_time)]
    pub waiting_time: Duration,
    /// Write a YAML run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Economy file the trace was produced from
    pub config_file: PathBuf,
    /// Trace file, one `cycle:process` line per launch
    pub log_file: PathBuf,
    /// Write a YAML run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub async fn run_command(
    cli: Cli,
    settings: &ExchangeSettings,
    metrics: &MetricsRecorder,
) -> Result<ExitCode, RuntimeError> {
    match cli.command {
        Commands::Run(args) => {
            let run = run_scheduler_mode(
                &args.config_file,
                args.waiting_time,
                args.report.as_deref(),
                &settings.scheduler,
                metrics,
            )
            .await?;
            print!("{}", run.output);
            if args.metrics {
                match metrics.gather_metrics() {
                    Ok(text) => print!("{text}"),
                    Err(e) => tracing::error!("Failed to gather metrics: {e}"),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check(args) => {
            let check =
                run_checker_mode(&args.config_file, &args.log_file, args.report.as_deref(), metrics)
                    .await?;
            if check.accepted() {
                print!("{}", check.output);
                Ok(ExitCode::SUCCESS)
            } else {
                eprint!("{}", check.output);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
