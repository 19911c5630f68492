pub mod diagnostics;
pub mod error;
pub mod render;
pub mod runtime;

pub use error::RuntimeError;
// Frontends only need the runtime entry points.
pub use runtime::{
    parse_waiting_time, run_checker_mode, run_scheduler_mode, trace_path_for, CheckRun,
    SchedulerRun, Verdict,
};
