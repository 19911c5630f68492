//! Scheduler run settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Knobs for `run` beyond the command-line waiting time.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Stop the greedy run once the next event would pass this cycle.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub cycle_limit: Option<u64>,

    /// Write the schedule next to the economy file as `<name>.log`.
    #[serde(default = "default_write_trace")]
    pub write_trace: bool,
}

fn default_write_trace() -> bool {
    true
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            cycle_limit: None,
            write_trace: default_write_trace(),
        }
    }
}
