//! Cooperative stop conditions for open-ended runs.
//!
//! The greedy scheduler can keep launching forever (a process with no needs,
//! a zero-duration production loop), so its runs carry a [`StopCondition`].
//! Conditions are polled between launches and between event steps, never
//! inside one, so a halted run always leaves a consistent ledger.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use exchange_core::Cycle;

/// Why a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// Nothing is running and nothing more can start.
    Settled,
    /// The wall-clock budget ran out.
    DeadlineReached,
    /// The next event lies past the configured cycle limit.
    CycleLimitReached,
    /// The cancellation flag was raised.
    Cancelled,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HaltReason::Settled => "settled",
            HaltReason::DeadlineReached => "deadline reached",
            HaltReason::CycleLimitReached => "cycle limit reached",
            HaltReason::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StopCondition {
    deadline: Option<Instant>,
    cycle_limit: Option<Cycle>,
    cancel: Option<Arc<AtomicBool>>,
}

impl StopCondition {
    /// A condition that never fires; replay runs use this.
    pub fn never() -> Self {
        Self::default()
    }

    /// Fires once `budget` has elapsed from now.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.deadline = Instant::now().checked_add(budget);
        self
    }

    /// Forbids advancing the clock past `limit`.
    pub fn with_cycle_limit(mut self, limit: Cycle) -> Self {
        self.cycle_limit = Some(limit);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Checks the cancellation flag and the deadline.
    pub fn interrupted(&self) -> Option<HaltReason> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
        {
            return Some(HaltReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(HaltReason::DeadlineReached),
            _ => None,
        }
    }

    /// Whether the clock may move to `cycle`.
    pub fn permits(&self, cycle: Cycle) -> bool {
        self.cycle_limit.map_or(true, |limit| cycle <= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_does_not_fire() {
        let stop = StopCondition::never();
        assert_eq!(stop.interrupted(), None);
        assert!(stop.permits(Cycle::MAX));
    }

    #[test]
    fn elapsed_deadline_fires() {
        let stop = StopCondition::never().with_budget(Duration::ZERO);
        assert_eq!(stop.interrupted(), Some(HaltReason::DeadlineReached));
    }

    #[test]
    fn cancel_flag_takes_precedence() {
        let flag = Arc::new(AtomicBool::new(false));
        let stop = StopCondition::never()
            .with_budget(Duration::ZERO)
            .with_cancel_flag(flag.clone());
        assert_eq!(stop.interrupted(), Some(HaltReason::DeadlineReached));
        flag.store(true, Ordering::Release);
        assert_eq!(stop.interrupted(), Some(HaltReason::Cancelled));
    }

    #[test]
    fn cycle_limit_is_inclusive() {
        let stop = StopCondition::never().with_cycle_limit(10);
        assert!(stop.permits(10));
        assert!(!stop.permits(11));
    }
}
