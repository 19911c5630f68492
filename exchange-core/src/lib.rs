//! # exchange-core
//!
//! Data model of the production economy: resource ledgers, process
//! definitions, the pre-indexed process catalog, optimize directives and
//! launch schedules. Everything here is plain data guarded by invariants;
//! time and control flow live in `exchange-simulator`.
//!
//! ### Key Submodules:
//! - `ledger`: resource name to quantity mapping with checked debit
//! - `catalog`: immutable, declaration-ordered process list with a name index
//! - `schedule`: ordered `(cycle, process)` launch records
//! - `economy`: the validated bundle consumed by the scheduler and verifier

pub mod catalog;
pub mod economy;
pub mod error;
pub mod ledger;
pub mod optimize;
pub mod process;
pub mod schedule;

pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::economy::*;
    pub use crate::error::*;
    pub use crate::ledger::*;
    pub use crate::optimize::*;
    pub use crate::process::*;
    pub use crate::schedule::*;
}

pub use error::ModelError;

/// Discrete simulated time unit.
pub type Cycle = u64;

/// Amount of a single resource.
pub type Quantity = u64;
