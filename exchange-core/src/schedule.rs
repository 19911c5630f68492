//! Launch schedules.
//!
//! A schedule is the ordered list of `(cycle, process)` launches. The greedy
//! scheduler produces one; the verifier replays one read from a trace file.
//! Cycles never decrease along a schedule, and entries sharing a cycle keep
//! their order since that order decides which launch fails first.

use crate::catalog::{Catalog, ProcessId};
use crate::{Cycle, ModelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub cycle: Cycle,
    pub process: ProcessId,
}

impl ScheduleEntry {
    pub fn new(cycle: Cycle, process: ProcessId) -> Self {
        Self { cycle, process }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from externally ordered entries, rejecting any entry
    /// whose cycle is earlier than its predecessor's.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Result<Self, ModelError> {
        for (index, pair) in entries.windows(2).enumerate() {
            if pair[1].cycle < pair[0].cycle {
                return Err(ModelError::TraceOutOfOrder {
                    index: index + 1,
                    cycle: pair[1].cycle,
                    previous: pair[0].cycle,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Appends a launch. Callers advance time monotonically, so order holds.
    pub fn push(&mut self, entry: ScheduleEntry) {
        debug_assert!(self
            .entries
            .last()
            .map_or(true, |last| last.cycle <= entry.cycle));
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter()
    }

    /// `cycle:name` lines, the trace file body.
    pub fn lines<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = String> + 'a {
        self.entries
            .iter()
            .map(|e| format!("{}:{}", e.cycle, catalog.get(e.process).name))
    }

    /// BLAKE3 digest over the rendered trace lines.
    pub fn digest(&self, catalog: &Catalog) -> String {
        let mut hasher = blake3::Hasher::new();
        for line in self.lines(catalog) {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize().as_bytes())
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
