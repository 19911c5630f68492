use crate::catalog::Catalog;
use crate::ledger::Ledger;
use crate::optimize::OptimizeDirective;

/// Validated input to a scheduling or verification run: initial stocks, the
/// process catalog and the optimize directive.
///
/// Runs only ever read an `Economy`; each run copies `stocks` into its own
/// ledger, so repeated runs over the same value are independent.
#[derive(Debug, Clone)]
pub struct Economy {
    pub stocks: Ledger,
    pub catalog: Catalog,
    pub optimize: OptimizeDirective,
}

impl Economy {
    pub fn new(stocks: Ledger, catalog: Catalog, optimize: OptimizeDirective) -> Self {
        Self {
            stocks,
            catalog,
            optimize,
        }
    }
}
