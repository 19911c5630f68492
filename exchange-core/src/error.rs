use thiserror::Error;

use crate::{Cycle, Quantity};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Missing processes")]
    EmptyCatalog,

    #[error("Missing optimize directive")]
    EmptyOptimize,

    #[error("process '{0}' not found in config")]
    UnknownProcess(String),

    #[error("process id {0} is outside the catalog")]
    UnknownProcessId(usize),

    #[error("trace entry {index} at cycle {cycle} precedes cycle {previous}")]
    TraceOutOfOrder {
        index: usize,
        cycle: Cycle,
        previous: Cycle,
    },

    #[error("debit of {needed} {resource} would overdraw a stock of {available}")]
    Overdraft {
        resource: String,
        needed: Quantity,
        available: Quantity,
    },
}
