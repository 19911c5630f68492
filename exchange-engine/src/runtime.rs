/*!
# Runtime

Drives the two entry points of the binary:

- **Scheduler mode** loads an economy, runs the greedy scheduler on a blocking
  thread under the waiting-time budget and writes the resulting trace.
- **Checker mode** loads an economy and a trace and replays the trace.

Both render their console output as text and leave printing to the frontend.
*/

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use opentelemetry::KeyValue;
use tokio::task;
use tracing::{info, instrument, warn};

use exchange_config::{load_economy, load_trace, render_trace, SchedulerSettings};
use exchange_core::Cycle;
use exchange_simulator::{Infeasibility, ScheduleOutcome, SimulationError, Simulator, StopCondition};
use exchange_telemetry::{EventLogger, MetricsRecorder};

use crate::diagnostics::{record_run_report, RunMode, RunSummary};
use crate::error::RuntimeError;
use crate::render::{render_accepted, render_rejected, render_schedule};

/// Result of `run`.
#[derive(Debug)]
pub struct SchedulerRun {
    pub outcome: ScheduleOutcome,
    /// Console report.
    pub output: String,
    pub trace_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted { final_cycle: Cycle },
    Rejected(Infeasibility),
}

/// Result of `check`.
#[derive(Debug)]
pub struct CheckRun {
    pub verdict: Verdict,
    pub output: String,
}

impl CheckRun {
    pub fn accepted(&self) -> bool {
        matches!(self.verdict, Verdict::Accepted { .. })
    }
}

/// Parses a waiting time in (fractional) seconds.
pub fn parse_waiting_time(raw: &str) -> Result<Duration, RuntimeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| RuntimeError::InvalidWaitingTime(raw.to_owned()))
}

/// `<config without extension>.log`
pub fn trace_path_for(config_path: &Path) -> PathBuf {
    config_path.with_extension("log")
}

/// Runs the greedy scheduler over the economy in `config_path`.
#[instrument(level = "info", name = "run_scheduler_mode", skip(settings, metrics))]
pub async fn run_scheduler_mode(
    config_path: &Path,
    waiting_time: Duration,
    report_path: Option<&Path>,
    settings: &SchedulerSettings,
    metrics: &MetricsRecorder,
) -> Result<SchedulerRun, RuntimeError> {
    let economy = load_economy(config_path)?;
    info!(
        processes = economy.catalog.len(),
        resources = economy.stocks.len(),
        "economy loaded"
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let mut stop = StopCondition::never()
        .with_budget(waiting_time)
        .with_cancel_flag(Arc::clone(&cancel));
    if let Some(limit) = settings.cycle_limit {
        stop = stop.with_cycle_limit(limit);
    }

    let interrupt = tokio::spawn(cancel_on_ctrl_c(cancel));
    let started = Instant::now();
    let (economy, outcome) = task::spawn_blocking(move || {
        let outcome = Simulator::new(&economy).schedule(&stop);
        (economy, outcome)
    })
    .await?;
    interrupt.abort();
    let outcome = outcome?;
    let elapsed = started.elapsed();
    metrics.observe_run(outcome.schedule.len(), outcome.final_cycle, elapsed.as_secs_f64());

    let trace_path = if settings.write_trace {
        let path = trace_path_for(config_path);
        fs::write(&path, render_trace(&outcome.schedule, &economy.catalog))?;
        info!(path = %path.display(), "trace written");
        Some(path)
    } else {
        None
    };

    EventLogger::log_event(
        "schedule_finished",
        vec![
            KeyValue::new("launches", outcome.schedule.len().to_string()),
            KeyValue::new("final_cycle", outcome.final_cycle.to_string()),
            KeyValue::new("halt", outcome.halt.to_string()),
        ],
    )
    .await;

    if let Some(path) = report_path {
        let summary = RunSummary {
            mode: RunMode::Schedule,
            config: config_path.display().to_string(),
            final_cycle: outcome.final_cycle,
            outcome: outcome.halt.to_string(),
            error: None,
            launches: outcome.schedule.len(),
            schedule_digest: outcome.schedule.digest(&economy.catalog),
            stocks: Some(outcome.stocks.clone()),
            elapsed_ms: millis(elapsed),
        };
        record_run_report(path, &summary)?;
    }

    let output = render_schedule(&outcome, &economy.catalog);
    Ok(SchedulerRun {
        outcome,
        output,
        trace_path,
    })
}

/// Replays the trace in `trace_path` against the economy in `config_path`.
///
/// An unaffordable launch is a [`Verdict::Rejected`], not an error. Load
/// failures and engine invariant violations are errors.
#[instrument(level = "info", name = "run_checker_mode", skip(metrics))]
pub async fn run_checker_mode(
    config_path: &Path,
    trace_path: &Path,
    report_path: Option<&Path>,
    metrics: &MetricsRecorder,
) -> Result<CheckRun, RuntimeError> {
    let economy = load_economy(config_path)?;
    let trace = load_trace(trace_path, &economy.catalog)?;
    info!(entries = trace.len(), "trace loaded");

    let started = Instant::now();
    let (economy, trace, result) = task::spawn_blocking(move || {
        let result = Simulator::new(&economy).verify(&trace);
        (economy, trace, result)
    })
    .await?;
    let elapsed = started.elapsed();

    let verdict = match result {
        Ok(final_cycle) => {
            metrics.observe_run(trace.len(), final_cycle, elapsed.as_secs_f64());
            Verdict::Accepted { final_cycle }
        }
        Err(SimulationError::Infeasible(infeasibility)) => {
            metrics.inc_failed_verifications();
            Verdict::Rejected(infeasibility)
        }
        Err(other) => return Err(other.into()),
    };

    let (final_cycle, outcome, error, output) = match &verdict {
        Verdict::Accepted { final_cycle } => {
            (*final_cycle, "accepted", None, render_accepted(*final_cycle))
        }
        Verdict::Rejected(infeasibility) => (
            infeasibility.cycle,
            "rejected",
            Some(infeasibility.to_string()),
            render_rejected(infeasibility),
        ),
    };

    EventLogger::log_event(
        "trace_checked",
        vec![
            KeyValue::new("entries", trace.len().to_string()),
            KeyValue::new("final_cycle", final_cycle.to_string()),
            KeyValue::new("verdict", outcome),
        ],
    )
    .await;

    if let Some(path) = report_path {
        let summary = RunSummary {
            mode: RunMode::Check,
            config: config_path.display().to_string(),
            final_cycle,
            outcome: outcome.to_owned(),
            error,
            launches: trace.len(),
            schedule_digest: trace.digest(&economy.catalog),
            stocks: None,
            elapsed_ms: millis(elapsed),
        };
        record_run_report(path, &summary)?;
    }

    Ok(CheckRun { verdict, output })
}

async fn cancel_on_ctrl_c(cancel: Arc<AtomicBool>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("interrupt received, stopping the scheduler");
        cancel.store(true, Ordering::Release);
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
