//! Greedy launch policy.
//!
//! First-fit in declaration order: launch the first affordable process,
//! then rescan the catalog from the top, until a full scan finds nothing.
//! The optimize directive does not influence the choice.

use exchange_core::catalog::{Catalog, ProcessId};
use exchange_core::ledger::Ledger;
use exchange_core::schedule::{Schedule, ScheduleEntry};
use exchange_core::Cycle;

use crate::engine::{CycleContext, LaunchPolicy, RunState, StartPhase};
use crate::error::SimulationError;

#[derive(Debug, Default)]
pub struct GreedyPolicy {
    schedule: Schedule,
}

impl GreedyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launches recorded so far.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }
}

/// First process in declaration order whose needs `stocks` can cover.
pub fn first_affordable(catalog: &Catalog, stocks: &Ledger) -> Option<ProcessId> {
    catalog
        .iter()
        .find(|(_, process)| stocks.is_sufficient(&process.needs))
        .map(|(id, _)| id)
}

impl LaunchPolicy for GreedyPolicy {
    fn next_launch(&self) -> Option<Cycle> {
        None
    }

    fn launch(
        &mut self,
        ctx: &CycleContext<'_>,
        state: &mut RunState,
    ) -> Result<StartPhase, SimulationError> {
        loop {
            // Polled per launch: a process with no needs is affordable forever.
            if let Some(reason) = ctx.stop.interrupted() {
                return Ok(StartPhase::Halted(reason));
            }
            let Some(id) = first_affordable(ctx.catalog, state.ledger()) else {
                return Ok(StartPhase::Complete);
            };
            state.start(ctx, id)?;
            self.schedule.push(ScheduleEntry::new(ctx.cycle, id));
        }
    }
}
