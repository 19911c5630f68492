//! # Exchange Telemetry
//!
//! Logging setup, structured run events and Prometheus run metrics.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
