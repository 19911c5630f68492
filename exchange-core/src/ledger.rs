//! Resource ledger.
//!
//! A ledger maps resource names to quantities. Absent entries read as zero.
//! The only mutations are [`Ledger::debit`] and [`Ledger::credit`]; a debit
//! that would drive any entry below zero is rejected as a whole and leaves
//! the ledger untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Quantity};

/// First resource found lacking when checking a needs ledger against stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub resource: String,
    pub needed: Quantity,
    pub available: Quantity,
}

/// Ordered mapping from resource name to quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<String, Quantity>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held for `resource`, zero when absent.
    #[inline]
    pub fn get(&self, resource: &str) -> Quantity {
        self.entries.get(resource).copied().unwrap_or(0)
    }

    /// Overwrites the quantity held for `resource`.
    pub fn set(&mut self, resource: impl Into<String>, quantity: Quantity) {
        self.entries.insert(resource.into(), quantity);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in resource name order, including explicit zeroes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.entries.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// True iff every resource in `needs` is held in at least that quantity.
    pub fn is_sufficient(&self, needs: &Ledger) -> bool {
        self.shortfall(needs).is_none()
    }

    /// The first resource (in name order) that `needs` asks for more of than
    /// is held, or `None` when the needs are affordable.
    pub fn shortfall(&self, needs: &Ledger) -> Option<Shortfall> {
        needs.iter().find_map(|(resource, needed)| {
            let available = self.get(resource);
            (available < needed).then(|| Shortfall {
                resource: resource.to_owned(),
                needed,
                available,
            })
        })
    }

    /// Subtracts every quantity in `needs`.
    ///
    /// Fails with [`ModelError::Overdraft`] without mutating anything when
    /// any resource is short.
    pub fn debit(&mut self, needs: &Ledger) -> Result<(), ModelError> {
        if let Some(short) = self.shortfall(needs) {
            return Err(ModelError::Overdraft {
                resource: short.resource,
                needed: short.needed,
                available: short.available,
            });
        }
        for (resource, needed) in needs.iter() {
            let held = self.entries.entry(resource.to_owned()).or_insert(0);
            *held -= needed;
        }
        Ok(())
    }

    /// Adds every quantity in `results`.
    pub fn credit(&mut self, results: &Ledger) {
        for (resource, produced) in results.iter() {
            let held = self.entries.entry(resource.to_owned()).or_insert(0);
            *held = held.saturating_add(produced);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Quantity)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (S, Quantity)>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        for (resource, quantity) in iter {
            ledger.set(resource, quantity);
        }
        ledger
    }
}

/// Renders `name:qty;name:qty`, the inner form of a process needs/results list.
impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (resource, quantity)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{resource}:{quantity}")?;
        }
        Ok(())
    }
}
