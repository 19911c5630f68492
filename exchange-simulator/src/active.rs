use exchange_core::catalog::ProcessId;
use exchange_core::Cycle;

/// A launched process waiting for its completion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveInstance {
    pub process: ProcessId,
    pub start_cycle: Cycle,
    pub end_cycle: Cycle,
}

/// Running instances in launch order.
#[derive(Debug, Clone, Default)]
pub struct ActiveSet {
    instances: Vec<ActiveInstance>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instance: ActiveInstance) {
        self.instances.push(instance);
    }

    /// Earliest completion cycle, `None` when nothing is running.
    pub fn next_completion(&self) -> Option<Cycle> {
        self.instances.iter().map(|i| i.end_cycle).min()
    }

    /// Removes and returns every instance with `end_cycle <= cycle`, keeping
    /// launch order in both the returned and the remaining instances.
    pub fn take_due(&mut self, cycle: Cycle) -> Vec<ActiveInstance> {
        let (due, running) = self
            .instances
            .drain(..)
            .partition(|instance| instance.end_cycle <= cycle);
        self.instances = running;
        due
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exchange_core::catalog::Catalog;
    use exchange_core::ledger::Ledger;
    use exchange_core::process::Process;

    #[test]
    fn take_due_keeps_launch_order() {
        let catalog = Catalog::new(vec![
            Process::new("a", Ledger::new(), Ledger::new(), 0),
            Process::new("b", Ledger::new(), Ledger::new(), 0),
        ])
        .unwrap();
        let (a, b) = (catalog.resolve("a").unwrap(), catalog.resolve("b").unwrap());
        let mut active = ActiveSet::new();
        for (process, end_cycle) in [(b, 4), (a, 9), (a, 2)] {
            active.insert(ActiveInstance {
                process,
                start_cycle: 0,
                end_cycle,
            });
        }
        assert_eq!(active.next_completion(), Some(2));

        let due: Vec<_> = active.take_due(4).iter().map(|i| i.end_cycle).collect();
        assert_eq!(due, [4, 2]);
        assert_eq!(active.len(), 1);
        assert_eq!(active.next_completion(), Some(9));
    }

    #[test]
    fn empty_set_has_no_next_completion() {
        let mut active = ActiveSet::new();
        assert_eq!(active.next_completion(), None);
        assert!(active.take_due(100).is_empty());
    }
}
