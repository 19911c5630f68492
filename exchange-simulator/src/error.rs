use thiserror::Error;

use exchange_core::{Cycle, ModelError, Quantity};

/// A replayed launch whose needs exceed the stock held at its cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at {cycle}:{process} stock insufficient (need {needed} of {resource}, have {available})")]
pub struct Infeasibility {
    pub cycle: Cycle,
    pub process: String,
    pub resource: String,
    pub needed: Quantity,
    pub available: Quantity,
}

/// Engine state that must never be reachable from validated input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error(transparent)]
    Ledger(#[from] ModelError),

    #[error("clock moved backwards from cycle {from} to {to}")]
    TimeReversal { from: Cycle, to: Cycle },

    #[error("process '{process}' started at {start} overflows the cycle counter")]
    CycleOverflow { process: String, start: Cycle },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The trace is not executable. This is the verifier's verdict, not a defect.
    #[error(transparent)]
    Infeasible(#[from] Infeasibility),

    #[error("internal invariant violated at cycle {cycle}: {source}")]
    Invariant {
        cycle: Cycle,
        #[source]
        source: InvariantViolation,
    },

    #[error("invalid run input: {0}")]
    Config(#[from] ModelError),
}

impl SimulationError {
    pub(crate) fn invariant(cycle: Cycle, source: impl Into<InvariantViolation>) -> Self {
        SimulationError::Invariant {
            cycle,
            source: source.into(),
        }
    }

    /// Cycle at which the run failed, when the failure happened mid-run.
    pub fn cycle(&self) -> Option<Cycle> {
        match self {
            SimulationError::Infeasible(infeasibility) => Some(infeasibility.cycle),
            SimulationError::Invariant { cycle, .. } => Some(*cycle),
            SimulationError::Config(_) => None,
        }
    }
}
