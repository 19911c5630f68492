//! Structured logging with tracing and OpenTelemetry attributes.
//!
//! Log output goes to stderr; stdout carries the run report.

use opentelemetry::KeyValue;
use tracing::{info_span, Instrument};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. `RUST_LOG` wins over `level`. A second
    /// call is a no-op.
    pub fn init(level: &str, json: bool) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let builder = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    }

    /// Emits one run-level event (`schedule_finished`, `trace_rejected`, ...).
    pub async fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("run_event", event_type = event_type, otel.kind = "INTERNAL");

        async {
            tracing::info!(metadata = ?metadata, "Run event recorded");
        }
        .instrument(span)
        .await
    }
}
