//! # Event-driven engine
//!
//! One skeleton shared by the scheduler and the verifier. Each outer
//! iteration works on a single cycle:
//!
//! 1. completion phase: credit every running instance due at or before the
//!    current cycle;
//! 2. start phase: hand the ledger to the [`LaunchPolicy`];
//! 3. advance the clock to the earliest pending event, either a completion
//!    or a launch the policy has committed to.
//!
//! The run ends when no event is pending. A zero-duration launch is due on
//! the cycle it starts, so the next iteration stays on that cycle, collects
//! it, and offers the policy another start phase.

use tracing::{debug, info, trace};

use exchange_core::catalog::{Catalog, ProcessId};
use exchange_core::ledger::Ledger;
use exchange_core::Cycle;

use crate::active::{ActiveInstance, ActiveSet};
use crate::clock::CycleClock;
use crate::error::{InvariantViolation, SimulationError};
use crate::stop::{HaltReason, StopCondition};

/// Read-only view handed to a policy for one start phase.
pub struct CycleContext<'a> {
    pub cycle: Cycle,
    pub catalog: &'a Catalog,
    pub stop: &'a StopCondition,
}

/// How a start phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPhase {
    /// The policy has nothing more to launch this cycle.
    Complete,
    /// The policy observed a stop condition between two launches.
    Halted(HaltReason),
}

/// Decides what to launch at each cycle.
pub trait LaunchPolicy {
    /// Cycle of the next launch the policy is committed to, if any. Policies
    /// that only react to completions return `None`.
    fn next_launch(&self) -> Option<Cycle>;

    /// Start phase for `ctx.cycle`, run after every due completion has been
    /// credited.
    fn launch(
        &mut self,
        ctx: &CycleContext<'_>,
        state: &mut RunState,
    ) -> Result<StartPhase, SimulationError>;
}

/// Mutable state of one run: the working ledger and the running instances.
#[derive(Debug, Clone)]
pub struct RunState {
    ledger: Ledger,
    active: ActiveSet,
}

impl RunState {
    fn new(stocks: &Ledger) -> Self {
        Self {
            ledger: stocks.clone(),
            active: ActiveSet::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Debits the process needs and registers the running instance.
    ///
    /// Callers check affordability first; an overdraft here is an invariant
    /// violation, never a verdict.
    pub fn start(&mut self, ctx: &CycleContext<'_>, id: ProcessId) -> Result<(), SimulationError> {
        let process = ctx.catalog.get(id);
        let end_cycle = ctx.cycle.checked_add(process.duration).ok_or_else(|| {
            SimulationError::invariant(
                ctx.cycle,
                InvariantViolation::CycleOverflow {
                    process: process.name.clone(),
                    start: ctx.cycle,
                },
            )
        })?;
        self.ledger
            .debit(&process.needs)
            .map_err(|e| SimulationError::invariant(ctx.cycle, e))?;
        self.active.insert(ActiveInstance {
            process: id,
            start_cycle: ctx.cycle,
            end_cycle,
        });
        debug!(cycle = ctx.cycle, process = %process.name, end_cycle, "process started");
        Ok(())
    }

    fn complete_due(&mut self, cycle: Cycle, catalog: &Catalog) -> usize {
        let due = self.active.take_due(cycle);
        for instance in &due {
            let process = catalog.get(instance.process);
            self.ledger.credit(&process.results);
            debug!(
                cycle,
                process = %process.name,
                started = instance.start_cycle,
                "process completed"
            );
        }
        due.len()
    }
}

/// Result of a run that ended without error.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Cycle of the last processed event.
    pub final_cycle: Cycle,
    pub stocks: Ledger,
    pub halt: HaltReason,
    /// Instances still running at a halt; always zero once settled.
    pub still_running: usize,
}

pub struct Engine<'a> {
    catalog: &'a Catalog,
    stop: &'a StopCondition,
}

impl<'a> Engine<'a> {
    pub fn new(catalog: &'a Catalog, stop: &'a StopCondition) -> Self {
        Self { catalog, stop }
    }

    /// Runs `policy` from `stocks` until no event is pending or the stop
    /// condition fires. `stocks` is copied, never mutated.
    pub fn run<P: LaunchPolicy>(
        &self,
        stocks: &Ledger,
        policy: &mut P,
    ) -> Result<RunReport, SimulationError> {
        let mut clock = CycleClock::new();
        let mut state = RunState::new(stocks);

        let halt = loop {
            let cycle = clock.now();
            if let Some(reason) = self.stop.interrupted() {
                break reason;
            }

            let completed = state.complete_due(cycle, self.catalog);
            trace!(cycle, completed, "completion phase done");

            let ctx = CycleContext {
                cycle,
                catalog: self.catalog,
                stop: self.stop,
            };
            if let StartPhase::Halted(reason) = policy.launch(&ctx, &mut state)? {
                break reason;
            }

            let next = match (state.active.next_completion(), policy.next_launch()) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) | (None, Some(a)) => a,
                (None, None) => break HaltReason::Settled,
            };
            if !self.stop.permits(next) {
                break HaltReason::CycleLimitReached;
            }
            clock
                .advance_to(next)
                .map_err(|e| SimulationError::invariant(cycle, e))?;
            trace!(from = cycle, to = next, "clock advanced");
        };

        info!(
            final_cycle = clock.now(),
            halt = %halt,
            running = state.active.len(),
            "run finished"
        );
        Ok(RunReport {
            final_cycle: clock.now(),
            still_running: state.active.len(),
            stocks: state.ledger,
            halt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exchange_core::process::Process;

    fn ledger(pairs: &[(&str, u64)]) -> Ledger {
        pairs.iter().map(|(n, q)| (*n, *q)).collect()
    }

    /// Launches a fixed list of processes at cycle 0 and nothing afterwards.
    struct LaunchOnce(Vec<ProcessId>);

    impl LaunchPolicy for LaunchOnce {
        fn next_launch(&self) -> Option<Cycle> {
            None
        }

        fn launch(
            &mut self,
            ctx: &CycleContext<'_>,
            state: &mut RunState,
        ) -> Result<StartPhase, SimulationError> {
            for id in self.0.drain(..) {
                state.start(ctx, id)?;
            }
            Ok(StartPhase::Complete)
        }
    }

    #[test]
    fn completions_jump_straight_to_end_cycle() {
        let catalog = Catalog::new(vec![Process::new(
            "slow",
            ledger(&[("ore", 1)]),
            ledger(&[("ingot", 1)]),
            50_000,
        )])
        .unwrap();
        let id = catalog.resolve("slow").unwrap();
        let stop = StopCondition::never();
        let report = Engine::new(&catalog, &stop)
            .run(&ledger(&[("ore", 1)]), &mut LaunchOnce(vec![id]))
            .unwrap();
        assert_eq!(report.final_cycle, 50_000);
        assert_eq!(report.halt, HaltReason::Settled);
        assert_eq!(report.stocks, ledger(&[("ingot", 1), ("ore", 0)]));
    }

    #[test]
    fn caller_stocks_are_not_mutated() {
        let catalog =
            Catalog::new(vec![Process::new("eat", ledger(&[("a", 1)]), Ledger::new(), 1)]).unwrap();
        let id = catalog.resolve("eat").unwrap();
        let stocks = ledger(&[("a", 1)]);
        let stop = StopCondition::never();
        Engine::new(&catalog, &stop)
            .run(&stocks, &mut LaunchOnce(vec![id]))
            .unwrap();
        assert_eq!(stocks.get("a"), 1);
    }

    #[test]
    fn unchecked_overdraft_is_an_invariant_violation() {
        let catalog =
            Catalog::new(vec![Process::new("eat", ledger(&[("a", 2)]), Ledger::new(), 1)]).unwrap();
        let id = catalog.resolve("eat").unwrap();
        let stop = StopCondition::never();
        let err = Engine::new(&catalog, &stop)
            .run(&ledger(&[("a", 1)]), &mut LaunchOnce(vec![id]))
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Invariant {
                cycle: 0,
                source: InvariantViolation::Ledger(_)
            }
        ));
    }

    #[test]
    fn cycle_limit_halts_before_advancing() {
        let catalog =
            Catalog::new(vec![Process::new("wait", Ledger::new(), Ledger::new(), 10)]).unwrap();
        let id = catalog.resolve("wait").unwrap();
        let stop = StopCondition::never().with_cycle_limit(9);
        let report = Engine::new(&catalog, &stop)
            .run(&Ledger::new(), &mut LaunchOnce(vec![id]))
            .unwrap();
        assert_eq!(report.halt, HaltReason::CycleLimitReached);
        assert_eq!(report.final_cycle, 0);
        assert_eq!(report.still_running, 1);
    }
}
