//! Replay launch policy.
//!
//! Starts exactly the launches a trace names, at the cycles it names, in
//! trace order. The first launch whose needs exceed the stock at its cycle
//! ends the run with an [`Infeasibility`]; nothing of that launch is debited.
//! A zero-duration launch completes before the entries after it on the same
//! cycle are evaluated.

use tracing::{debug, warn};

use exchange_core::catalog::Catalog;
use exchange_core::schedule::Schedule;
use exchange_core::Cycle;

use crate::engine::{CycleContext, LaunchPolicy, RunState, StartPhase};
use crate::error::{Infeasibility, SimulationError};

pub struct ReplayPolicy<'a> {
    trace: &'a Schedule,
    cursor: usize,
}

impl<'a> ReplayPolicy<'a> {
    /// Rejects traces that reference processes outside `catalog`.
    pub fn new(trace: &'a Schedule, catalog: &Catalog) -> Result<Self, SimulationError> {
        for entry in trace {
            catalog.checked_id(entry.process.index())?;
        }
        Ok(Self { trace, cursor: 0 })
    }

    /// Number of trace entries launched so far.
    pub fn replayed(&self) -> usize {
        self.cursor
    }
}

impl LaunchPolicy for ReplayPolicy<'_> {
    fn next_launch(&self) -> Option<Cycle> {
        self.trace.get(self.cursor).map(|entry| entry.cycle)
    }

    fn launch(
        &mut self,
        ctx: &CycleContext<'_>,
        state: &mut RunState,
    ) -> Result<StartPhase, SimulationError> {
        let trace = self.trace;
        while let Some(entry) = trace
            .get(self.cursor)
            .filter(|entry| entry.cycle == ctx.cycle)
        {
            let process = ctx.catalog.get(entry.process);
            debug!(cycle = entry.cycle, process = %process.name, "evaluating trace entry");

            if let Some(short) = state.ledger().shortfall(&process.needs) {
                warn!(
                    cycle = ctx.cycle,
                    process = %process.name,
                    resource = %short.resource,
                    needed = short.needed,
                    available = short.available,
                    "trace entry is not affordable"
                );
                return Err(Infeasibility {
                    cycle: ctx.cycle,
                    process: process.name.clone(),
                    resource: short.resource,
                    needed: short.needed,
                    available: short.available,
                }
                .into());
            }

            state.start(ctx, entry.process)?;
            self.cursor += 1;

            // Hand control back so the engine credits the zero-duration
            // instance before the next entry on this cycle is evaluated.
            if process.duration == 0 {
                break;
            }
        }
        Ok(StartPhase::Complete)
    }
}
