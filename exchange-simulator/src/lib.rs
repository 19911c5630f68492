/*!
# Exchange Simulator

Discrete-event resource accounting for the production economy. One engine
advances a cycle counter from event to event, crediting finished processes
and debiting newly started ones; what gets started is decided by a pluggable
[`LaunchPolicy`](engine::LaunchPolicy).

## Key Components:
- **Engine:** completion phase, start phase, jump to the next event.
- **Greedy policy:** first-fit scheduler in catalog declaration order.
- **Replay policy:** verifier that re-executes a recorded trace and reports
  the first unaffordable launch.
- **Stop conditions:** wall-clock budget, cycle limit and cancellation flag
  for open-ended scheduling runs.

The crate performs no I/O; callers render schedules and ledgers.
*/

use tracing::{info, instrument};

use exchange_core::economy::Economy;
use exchange_core::ledger::Ledger;
use exchange_core::schedule::Schedule;
use exchange_core::Cycle;

pub mod active;
pub mod clock;
pub mod engine;
pub mod error;
pub mod greedy;
pub mod replay;
pub mod stop;

pub use engine::{Engine, LaunchPolicy, RunReport};
pub use error::{Infeasibility, InvariantViolation, SimulationError};
pub use greedy::GreedyPolicy;
pub use replay::ReplayPolicy;
pub use stop::{HaltReason, StopCondition};

/// Result of a greedy scheduling run. Valid up to the halt, aborts included.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub schedule: Schedule,
    pub stocks: Ledger,
    pub final_cycle: Cycle,
    pub halt: HaltReason,
}

/// Runs the scheduler and the verifier against one economy.
///
/// Every call starts from a fresh copy of the economy's stocks, so calls are
/// independent of each other.
pub struct Simulator<'a> {
    economy: &'a Economy,
}

impl<'a> Simulator<'a> {
    pub fn new(economy: &'a Economy) -> Self {
        Self { economy }
    }

    /// Greedy schedule from the initial stocks until settled or `stop` fires.
    #[instrument(skip_all, fields(processes = self.economy.catalog.len()))]
    pub fn schedule(&self, stop: &StopCondition) -> Result<ScheduleOutcome, SimulationError> {
        let mut policy = GreedyPolicy::new();
        let report =
            Engine::new(&self.economy.catalog, stop).run(&self.economy.stocks, &mut policy)?;
        let schedule = policy.into_schedule();
        info!(
            launches = schedule.len(),
            final_cycle = report.final_cycle,
            halt = %report.halt,
            "schedule complete"
        );
        Ok(ScheduleOutcome {
            schedule,
            stocks: report.stocks,
            final_cycle: report.final_cycle,
            halt: report.halt,
        })
    }

    /// Replays `trace` and returns the cycle of its last event.
    #[instrument(skip_all, fields(entries = trace.len()))]
    pub fn verify(&self, trace: &Schedule) -> Result<Cycle, SimulationError> {
        let stop = StopCondition::never();
        let mut policy = ReplayPolicy::new(trace, &self.economy.catalog)?;
        let report =
            Engine::new(&self.economy.catalog, &stop).run(&self.economy.stocks, &mut policy)?;
        info!(final_cycle = report.final_cycle, "trace verified");
        Ok(report.final_cycle)
    }
}
