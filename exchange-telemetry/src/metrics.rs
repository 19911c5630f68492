//! Prometheus metrics for scheduler and verifier runs.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub launches: IntCounter,
    pub runs: IntCounter,
    pub failed_verifications: IntCounter,
    pub final_cycle: IntGauge,
    pub run_seconds: Histogram,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let launches = IntCounter::new(
            "exchange_launches_total",
            "Process instances started by scheduling or replay",
        )?;
        let runs = IntCounter::new("exchange_runs_total", "Completed engine runs")?;
        let failed_verifications = IntCounter::new(
            "exchange_verifications_failed_total",
            "Traces rejected by the verifier",
        )?;
        let final_cycle = IntGauge::new("exchange_final_cycle", "Final cycle of the last run")?;
        let run_seconds = Histogram::with_opts(
            HistogramOpts::new("exchange_run_seconds", "Wall-clock duration of engine runs")
                .buckets(vec![0.001, 0.01, 0.1, 1.0, 10.0, 60.0]),
        )?;

        registry.register(Box::new(launches.clone()))?;
        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(failed_verifications.clone()))?;
        registry.register(Box::new(final_cycle.clone()))?;
        registry.register(Box::new(run_seconds.clone()))?;

        Ok(Self {
            registry,
            launches,
            runs,
            failed_verifications,
            final_cycle,
            run_seconds,
        })
    }

    /// Records one finished run.
    pub fn observe_run(&self, launches: usize, final_cycle: u64, seconds: f64) {
        self.runs.inc();
        self.launches.inc_by(launches as u64);
        self.final_cycle
            .set(i64::try_from(final_cycle).unwrap_or(i64::MAX));
        self.run_seconds.observe(seconds);
    }

    pub fn inc_failed_verifications(&self) {
        self.failed_verifications.inc();
    }

    /// Text exposition format.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::<u8>::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
