//! Process catalog.
//!
//! The catalog is built once from the declared processes and never mutated.
//! Declaration order is the greedy tie-break order, so processes are kept in a
//! `Vec` and addressed by [`ProcessId`]. Name lookup goes through an index
//! built at construction; when two processes share a name the later
//! declaration wins the lookup, while both still take part in greedy scans.

use std::collections::HashMap;
use std::fmt;

use crate::process::Process;
use crate::ModelError;

/// Position of a process in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(usize);

impl ProcessId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    processes: Vec<Process>,
    by_name: HashMap<String, ProcessId>,
}

impl Catalog {
    pub fn new(processes: Vec<Process>) -> Result<Self, ModelError> {
        if processes.is_empty() {
            return Err(ModelError::EmptyCatalog);
        }
        let by_name = processes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), ProcessId(i)))
            .collect();
        Ok(Self { processes, by_name })
    }

    /// Panics if `id` does not belong to this catalog; ids are only minted here.
    #[inline]
    pub fn get(&self, id: ProcessId) -> &Process {
        &self.processes[id.0]
    }

    /// Resolves a raw index, used when accepting ids built elsewhere.
    pub fn checked_id(&self, index: usize) -> Result<ProcessId, ModelError> {
        if index < self.processes.len() {
            Ok(ProcessId(index))
        } else {
            Err(ModelError::UnknownProcessId(index))
        }
    }

    pub fn lookup(&self, name: &str) -> Option<ProcessId> {
        self.by_name.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> Result<ProcessId, ModelError> {
        self.lookup(name)
            .ok_or_else(|| ModelError::UnknownProcess(name.to_owned()))
    }

    /// Processes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ProcessId, &Process)> {
        self.processes
            .iter()
            .enumerate()
            .map(|(i, p)| (ProcessId(i), p))
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
