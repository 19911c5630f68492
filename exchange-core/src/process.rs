use std::fmt;

use crate::ledger::Ledger;
use crate::Cycle;

/// A named transformation: consumes `needs` at launch, credits `results`
/// `duration` cycles later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub needs: Ledger,
    pub results: Ledger,
    pub duration: Cycle,
}

impl Process {
    pub fn new(name: impl Into<String>, needs: Ledger, results: Ledger, duration: Cycle) -> Self {
        Self {
            name: name.into(),
            needs,
            results,
            duration,
        }
    }
}

/// Renders the economy file form `name:(needs):(results):duration`.
impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:({}):({}):{}",
            self.name, self.needs, self.results, self.duration
        )
    }
}
